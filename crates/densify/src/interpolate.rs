//! Neighbor interpolation for high zoom levels.
//!
//! Every sample is joined to the samples found in the 3x3 block of index
//! cells around it, and `factor - 1` synthetic points are laid along each
//! such edge at equal parametric steps.
//!
//! The neighbor relation is symmetric, so a pair (P, Q) is normally visited
//! once from P and once from Q, producing two sets of points on the same
//! segment. That doubling is kept unless [`InterpolationOptions::dedupe_edges`]
//! is set.

use aqi_common::{PointCollection, Provenance, SamplePoint, SkipCounts, SkipReason};
use tracing::{debug, warn};

use crate::error::{DensifyError, Result};
use crate::index::{SpatialIndex, UniformGridIndex};
use crate::selector::EngineOutput;

/// Settings for one interpolation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpolationOptions {
    /// Segments per edge; must be at least 2.
    pub factor: u32,
    /// Visit each unordered pair once (lower input index first).
    pub dedupe_edges: bool,
}

impl InterpolationOptions {
    pub fn new(factor: u32) -> Self {
        Self {
            factor,
            dedupe_edges: false,
        }
    }
}

/// Interpolate using the default uniform-grid bucket index.
pub fn interpolate(
    collection: &PointCollection,
    options: &InterpolationOptions,
) -> Result<EngineOutput> {
    interpolate_with(collection, options, UniformGridIndex::new())
}

/// Interpolate with a caller-supplied, empty spatial index.
///
/// Output is the input points in their original order followed by the
/// synthetic points in edge discovery order. Points with a non-finite
/// position are dropped and counted; finite points that cannot be indexed
/// are kept but form no edges. Collections with fewer than two usable points
/// are returned unchanged.
pub fn interpolate_with<I: SpatialIndex>(
    collection: &PointCollection,
    options: &InterpolationOptions,
    mut index: I,
) -> Result<EngineOutput> {
    if options.factor < 2 {
        return Err(DensifyError::invalid_config(format!(
            "interpolation factor must be >= 2, got {}",
            options.factor
        )));
    }

    let mut skipped = SkipCounts::new();

    let mut points = Vec::with_capacity(collection.len());
    for point in collection.iter() {
        if point.lon.is_finite() && point.lat.is_finite() {
            points.push(*point);
        } else {
            warn!(lon = point.lon, lat = point.lat, "Dropping point with non-finite position");
            skipped.record(SkipReason::NonFiniteCoordinate);
        }
    }

    if points.len() < 2 {
        debug!(
            points = points.len(),
            "Insufficient points for interpolation, returning usable points unchanged"
        );
        let collection = if skipped.is_empty() {
            collection.clone()
        } else {
            PointCollection::new(points)
        };
        return Ok(EngineOutput {
            collection,
            skipped,
        });
    }

    let mut indexed = vec![false; points.len()];
    for (id, point) in points.iter().enumerate() {
        match index.insert(id, point) {
            Ok(()) => indexed[id] = true,
            Err(reason) => {
                warn!(id, lon = point.lon, lat = point.lat, reason = %reason, "Point not indexed");
                skipped.record(reason);
            }
        }
    }

    let mut output = points.clone();
    let mut edges = 0usize;

    for (id, point) in points.iter().enumerate() {
        if !indexed[id] {
            continue;
        }

        let neighbors = match index.query_neighbors(point) {
            Ok(neighbors) => neighbors,
            Err(reason) => {
                warn!(id, reason = %reason, "Neighbor lookup failed");
                skipped.record(reason);
                continue;
            }
        };

        for neighbor_id in neighbors {
            if neighbor_id == id || (options.dedupe_edges && neighbor_id < id) {
                continue;
            }
            let neighbor = &points[neighbor_id];
            edges += 1;

            for step in 1..options.factor {
                match interpolate_step(point, neighbor, step, options.factor) {
                    Ok(synthetic) => output.push(synthetic),
                    Err(reason) => skipped.record(reason),
                }
            }
        }
    }

    debug!(
        original = points.len(),
        edges,
        interpolated = output.len() - points.len(),
        skipped = skipped.total(),
        "Interpolation complete"
    );

    Ok(EngineOutput {
        collection: PointCollection::new(output),
        skipped,
    })
}

/// Point `step / factor` of the way from `from` to `to`.
///
/// Position is linear in (lon, lat); value is the linear blend rounded to
/// the nearest integer.
fn interpolate_step(
    from: &SamplePoint,
    to: &SamplePoint,
    step: u32,
    factor: u32,
) -> std::result::Result<SamplePoint, SkipReason> {
    let ratio = f64::from(step) / f64::from(factor);
    let lon = from.lon + (to.lon - from.lon) * ratio;
    let lat = from.lat + (to.lat - from.lat) * ratio;
    let value = (from.value + (to.value - from.value) * ratio).round();

    if !lon.is_finite() || !lat.is_finite() || !value.is_finite() {
        return Err(SkipReason::NonFiniteResult);
    }

    Ok(SamplePoint::new(lon, lat, value, Provenance::Interpolated))
}
