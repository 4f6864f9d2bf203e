//! Spatial bucket index used for neighbor discovery.
//!
//! The interpolator only needs two capabilities: register a point under an
//! id, and list candidate neighbor ids for a point. [`UniformGridIndex`]
//! buckets points into a fixed quantization grid; anything else that
//! implements [`SpatialIndex`] (a k-d tree, for instance) can be passed to
//! [`interpolate_with`](crate::interpolate::interpolate_with) instead.

use std::collections::HashMap;

use aqi_common::{SamplePoint, SkipReason};

/// Quantization multiplier: cells are 0.01 degrees on each axis.
pub const DEFAULT_CELL_SCALE: f64 = 100.0;

/// Scaled coordinates this close to an integer are treated as on it.
///
/// `77.1 * 100.0` evaluates to `7709.999999999999`; without snapping that
/// station would land one cell west of where its decimal value puts it.
pub const BOUNDARY_SNAP: f64 = 1e-9;

/// Integer cell coordinates `(floor(lon * scale), floor(lat * scale))`.
pub type CellKey = (i64, i64);

/// Neighbor lookup over points identified by their position in the input.
pub trait SpatialIndex {
    /// Register the point stored at `id`.
    fn insert(&mut self, id: usize, point: &SamplePoint) -> Result<(), SkipReason>;

    /// Candidate neighbor ids of `point`, in a deterministic order.
    ///
    /// May include the id of `point` itself; callers filter it out.
    fn query_neighbors<'a>(
        &'a self,
        point: &SamplePoint,
    ) -> Result<Box<dyn Iterator<Item = usize> + 'a>, SkipReason>;
}

/// Uniform-grid bucket index.
///
/// A query returns the contents of the 3x3 block of cells around the
/// point's cell, scanning longitude offsets -1..=1 in the outer loop and
/// latitude offsets -1..=1 in the inner loop. Within a cell, ids come back
/// in insertion order.
#[derive(Debug, Clone)]
pub struct UniformGridIndex {
    scale: f64,
    buckets: HashMap<CellKey, Vec<usize>>,
}

impl UniformGridIndex {
    pub fn new() -> Self {
        Self::with_scale(DEFAULT_CELL_SCALE)
    }

    /// Index with cells of `1 / scale` degrees.
    pub fn with_scale(scale: f64) -> Self {
        Self {
            scale,
            buckets: HashMap::new(),
        }
    }

    /// Cell key for a position.
    pub fn cell_key(&self, lon: f64, lat: f64) -> Result<CellKey, SkipReason> {
        Ok((quantize(lon, self.scale)?, quantize(lat, self.scale)?))
    }

    /// Number of non-empty cells.
    pub fn cell_count(&self) -> usize {
        self.buckets.len()
    }

    /// Ids stored in one cell.
    pub fn bucket(&self, key: CellKey) -> &[usize] {
        self.buckets.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Default for UniformGridIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SpatialIndex for UniformGridIndex {
    fn insert(&mut self, id: usize, point: &SamplePoint) -> Result<(), SkipReason> {
        let key = self.cell_key(point.lon, point.lat)?;
        self.buckets.entry(key).or_default().push(id);
        Ok(())
    }

    fn query_neighbors<'a>(
        &'a self,
        point: &SamplePoint,
    ) -> Result<Box<dyn Iterator<Item = usize> + 'a>, SkipReason> {
        let (cx, cy) = self.cell_key(point.lon, point.lat)?;

        let cells = (-1i64..=1).flat_map(move |di| (-1i64..=1).map(move |dj| (di, dj)));
        let ids = cells
            .filter_map(move |(di, dj)| Some((cx.checked_add(di)?, cy.checked_add(dj)?)))
            .flat_map(move |key| self.bucket(key).iter().copied());

        Ok(Box::new(ids))
    }
}

/// `floor(coord * scale)` as an integer key component.
fn quantize(coord: f64, scale: f64) -> Result<i64, SkipReason> {
    let scaled = coord * scale;
    let nearest = scaled.round();
    let cell = if (scaled - nearest).abs() < BOUNDARY_SNAP {
        nearest
    } else {
        scaled.floor()
    };
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    if !cell.is_finite() || cell < i64::MIN as f64 || cell >= i64::MAX as f64 {
        return Err(SkipReason::CellKeyOutOfRange);
    }
    Ok(cell as i64)
}
