//! Sample points, provenance tags and skip accounting.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::bbox::BoundingBox;
use crate::category::{category, AqiCategory};

/// Index value that maps to an intensity of 1.0.
pub const INTENSITY_SCALE: f64 = 500.0;

/// Normalize a raw pollution index to a rendering weight.
///
/// Not clamped: values above 500 yield intensities above 1.0 and negative
/// values yield negative intensities.
#[inline]
pub fn intensity(value: f64) -> f64 {
    value / INTENSITY_SCALE
}

/// Where a point came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// A sample supplied by the data source.
    Measured,
    /// Inserted along a neighbor edge by the interpolator.
    Interpolated,
    /// A lattice point produced by the density grid.
    Synthesized,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Measured => "measured",
            Self::Interpolated => "interpolated",
            Self::Synthesized => "synthesized",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw record as delivered by the data source, not yet validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    pub lon: f64,
    pub lat: f64,
    pub value: f64,
}

impl RawSample {
    pub fn new(lon: f64, lat: f64, value: f64) -> Self {
        Self { lon, lat, value }
    }
}

/// A validated measurement or derived point, annotated for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub lon: f64,
    pub lat: f64,
    /// Pollution index.
    pub value: f64,
    /// `value / 500`.
    pub intensity: f64,
    pub provenance: Provenance,
}

impl SamplePoint {
    /// Build a point, deriving its intensity from `value`.
    pub fn new(lon: f64, lat: f64, value: f64, provenance: Provenance) -> Self {
        Self {
            lon,
            lat,
            value,
            intensity: intensity(value),
            provenance,
        }
    }

    pub fn measured(lon: f64, lat: f64, value: f64) -> Self {
        Self::new(lon, lat, value, Provenance::Measured)
    }

    pub fn position(&self) -> (f64, f64) {
        (self.lon, self.lat)
    }

    /// AQI band for this point's value.
    pub fn category(&self) -> AqiCategory {
        category(self.value)
    }
}

/// Why a point was left out of an engine's output.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Feature had no usable point geometry.
    MissingGeometry,
    /// Longitude or latitude was NaN or infinite.
    NonFiniteCoordinate,
    /// The pollution index was missing, non-numeric or not finite.
    NonFiniteValue,
    /// Quantized cell key does not fit the index key type.
    CellKeyOutOfRange,
    /// A derived value or weight came out NaN or infinite.
    NonFiniteResult,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingGeometry => "missing_geometry",
            Self::NonFiniteCoordinate => "non_finite_coordinate",
            Self::NonFiniteValue => "non_finite_value",
            Self::CellKeyOutOfRange => "cell_key_out_of_range",
            Self::NonFiniteResult => "non_finite_result",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-reason tally of skipped points.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkipCounts(BTreeMap<SkipReason, usize>);

impl SkipCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, reason: SkipReason) {
        *self.0.entry(reason).or_insert(0) += 1;
    }

    pub fn get(&self, reason: SkipReason) -> usize {
        self.0.get(&reason).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fold another tally into this one.
    pub fn merge(&mut self, other: &SkipCounts) {
        for (reason, count) in &other.0 {
            *self.0.entry(*reason).or_insert(0) += count;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkipReason, usize)> + '_ {
        self.0.iter().map(|(reason, count)| (*reason, *count))
    }
}

/// An ordered set of points plus an optional precomputed envelope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCollection {
    pub points: Vec<SamplePoint>,
    envelope: Option<BoundingBox>,
}

impl PointCollection {
    pub fn new(points: Vec<SamplePoint>) -> Self {
        Self {
            points,
            envelope: None,
        }
    }

    /// Attach a known envelope so it is not rescanned.
    pub fn with_envelope(mut self, envelope: BoundingBox) -> Self {
        self.envelope = Some(envelope);
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SamplePoint> {
        self.points.iter()
    }

    /// The supplied envelope, or one derived by scanning all points.
    pub fn envelope(&self) -> Option<BoundingBox> {
        self.envelope
            .or_else(|| BoundingBox::from_positions(self.points.iter().map(|p| p.position())))
    }

    /// Number of points carrying the given provenance.
    pub fn count_by(&self, provenance: Provenance) -> usize {
        self.points
            .iter()
            .filter(|p| p.provenance == provenance)
            .count()
    }
}

impl From<Vec<SamplePoint>> for PointCollection {
    fn from(points: Vec<SamplePoint>) -> Self {
        Self::new(points)
    }
}

impl<'a> IntoIterator for &'a PointCollection {
    type Item = &'a SamplePoint;
    type IntoIter = std::slice::Iter<'a, SamplePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
