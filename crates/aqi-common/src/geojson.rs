//! GeoJSON interchange for sample input and densified output.
//!
//! The data source delivers a `FeatureCollection` of `Point` features with an
//! `aqi` property. Reading is lenient: a malformed feature becomes a
//! [`SkipReason`] rather than failing the whole document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AqiError, AqiResult};
use crate::point::{RawSample, SamplePoint, SkipCounts, SkipReason};

/// Property holding the pollution index.
pub const VALUE_PROPERTY: &str = "aqi";

/// A GeoJSON FeatureCollection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureCollection {
    /// Type identifier (always "FeatureCollection").
    #[serde(rename = "type")]
    pub type_: String,

    pub features: Vec<Feature>,

    /// Run summary, written on output only.
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<OutputMetadata>,
}

impl FeatureCollection {
    /// Create a new empty FeatureCollection.
    pub fn new() -> Self {
        Self {
            type_: "FeatureCollection".to_string(),
            features: Vec::new(),
            metadata: None,
        }
    }

    /// Parse a collection, rejecting documents that are not a FeatureCollection.
    pub fn from_json(json: &str) -> AqiResult<Self> {
        let collection: Self = serde_json::from_str(json)?;
        if collection.type_ != "FeatureCollection" {
            return Err(AqiError::UnsupportedType(collection.type_));
        }
        Ok(collection)
    }

    /// Read and parse a collection from a file.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> AqiResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Build an output collection from engine points.
    pub fn from_points(points: &[SamplePoint], with_color: bool) -> Self {
        Self {
            features: points
                .iter()
                .map(|p| Feature::from_point(p, with_color))
                .collect(),
            ..Self::new()
        }
    }

    pub fn with_metadata(mut self, metadata: OutputMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Extract raw samples, tallying the features that could not be read.
    pub fn raw_samples(&self) -> (Vec<RawSample>, SkipCounts) {
        let mut samples = Vec::with_capacity(self.features.len());
        let mut skipped = SkipCounts::new();
        for feature in &self.features {
            match feature.raw_sample() {
                Ok(sample) => samples.push(sample),
                Err(reason) => skipped.record(reason),
            }
        }
        (samples, skipped)
    }

    pub fn to_json_pretty(&self) -> AqiResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for FeatureCollection {
    fn default() -> Self {
        Self::new()
    }
}

/// A GeoJSON Feature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feature {
    /// Type identifier (always "Feature").
    #[serde(rename = "type")]
    pub type_: String,

    #[serde(default)]
    pub geometry: Option<Geometry>,

    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

impl Feature {
    /// Create a point feature with the given index value.
    pub fn point(lon: f64, lat: f64, aqi: f64) -> Self {
        let mut properties = Map::new();
        properties.insert(VALUE_PROPERTY.to_string(), Value::from(aqi));
        Self {
            type_: "Feature".to_string(),
            geometry: Some(Geometry::point(lon, lat)),
            properties: Some(properties),
        }
    }

    fn from_point(point: &SamplePoint, with_color: bool) -> Self {
        let mut properties = Map::new();
        properties.insert(VALUE_PROPERTY.to_string(), Value::from(point.value));
        properties.insert("intensity".to_string(), Value::from(point.intensity));
        properties.insert(
            "provenance".to_string(),
            Value::from(point.provenance.as_str()),
        );
        if with_color {
            properties.insert(
                "color".to_string(),
                Value::from(point.category().color()),
            );
        }
        Self {
            type_: "Feature".to_string(),
            geometry: Some(Geometry::point(point.lon, point.lat)),
            properties: Some(properties),
        }
    }

    /// Read this feature as a raw sample.
    ///
    /// Coordinates are checked for presence and numeric type only; finiteness
    /// is the normalizer's job.
    pub fn raw_sample(&self) -> Result<RawSample, SkipReason> {
        let geometry = self.geometry.as_ref().ok_or(SkipReason::MissingGeometry)?;
        if geometry.type_ != "Point" {
            return Err(SkipReason::MissingGeometry);
        }
        let coords = geometry
            .coordinates
            .as_array()
            .ok_or(SkipReason::MissingGeometry)?;
        if coords.len() < 2 {
            return Err(SkipReason::MissingGeometry);
        }
        let lon = coords[0].as_f64().ok_or(SkipReason::NonFiniteCoordinate)?;
        let lat = coords[1].as_f64().ok_or(SkipReason::NonFiniteCoordinate)?;

        let value = self
            .properties
            .as_ref()
            .and_then(|props| props.get(VALUE_PROPERTY))
            .and_then(Value::as_f64)
            .ok_or(SkipReason::NonFiniteValue)?;

        Ok(RawSample::new(lon, lat, value))
    }
}

/// GeoJSON geometry, kept loose so malformed input can be reported per feature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub type_: String,

    #[serde(default)]
    pub coordinates: Value,
}

impl Geometry {
    pub fn point(lon: f64, lat: f64) -> Self {
        Self {
            type_: "Point".to_string(),
            coordinates: Value::from(vec![lon, lat]),
        }
    }
}

/// Summary attached to an output collection.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OutputMetadata {
    /// Engine that produced the features.
    pub engine: String,
    pub input_count: usize,
    pub output_count: usize,
    pub skipped: SkipCounts,
    pub generated_at: DateTime<Utc>,
}
