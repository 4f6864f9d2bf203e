//! Density grid synthesis for low zoom levels.
//!
//! Builds a regular lattice over the sample envelope (padded by 10% of its
//! span on each axis) and estimates every lattice point by inverse distance
//! weighting over all samples:
//!
//! ```text
//! value(G) = Σ w(P) * value(P) / Σ w(P)
//! w(P)     = 1 / d(G, P)²        for d >= 1e-4
//!          = 1000                otherwise (coincident sample)
//! ```
//!
//! Distances are plain Euclidean in (lon, lat) degrees. Cost is
//! O(resolution² × N); that is what keeps this engine to low zoom levels.

use aqi_common::{BoundingBox, PointCollection, Provenance, SamplePoint, SkipCounts, SkipReason};
use tracing::{debug, warn};

use crate::error::{DensifyError, Result};
use crate::selector::EngineOutput;

/// Fraction of the envelope span added on each side.
pub const PADDING_RATIO: f64 = 0.1;

/// Distances below this count as coincident with the sample.
pub const COINCIDENT_DISTANCE: f64 = 1e-4;

/// Weight given to a coincident sample in place of 1/d².
pub const COINCIDENT_WEIGHT: f64 = 1000.0;

/// Synthesize a `(resolution + 1)²` lattice of IDW estimates.
///
/// The input points are not part of the output. Grid points are emitted
/// with longitude as the outer loop and latitude as the inner loop. An empty
/// collection yields an empty result.
///
/// Estimates are left unrounded, so a lone sample is reproduced exactly at
/// every lattice point. Samples with a non-finite position are ignored and
/// counted as `NonFiniteCoordinate`. A sample whose weighted contribution
/// overflows anywhere is counted once as `NonFiniteResult`, however many
/// lattice points it was left out of.
pub fn synthesize(collection: &PointCollection, resolution: u32) -> Result<EngineOutput> {
    if resolution == 0 {
        return Err(DensifyError::invalid_config(
            "grid resolution must be >= 1",
        ));
    }

    let mut skipped = SkipCounts::new();

    let samples: Vec<SamplePoint> = collection
        .iter()
        .filter(|p| {
            let finite = p.lon.is_finite() && p.lat.is_finite();
            if !finite {
                skipped.record(SkipReason::NonFiniteCoordinate);
            }
            finite
        })
        .copied()
        .collect();

    let envelope = if samples.len() == collection.len() {
        collection.envelope()
    } else {
        BoundingBox::from_positions(samples.iter().map(|p| p.position()))
    };

    let Some(envelope) = envelope else {
        debug!("No points for density grid, returning empty result");
        return Ok(EngineOutput {
            collection: PointCollection::default(),
            skipped,
        });
    };

    let bounds = envelope.pad(PADDING_RATIO);
    let steps = resolution as usize + 1;
    let requested = steps
        .checked_mul(steps)
        .ok_or_else(|| DensifyError::allocation(usize::MAX, "grid size overflows usize"))?;

    let mut grid = Vec::new();
    grid.try_reserve_exact(requested)
        .map_err(|e| DensifyError::allocation(requested, e.to_string()))?;

    let lon_step = bounds.width() / f64::from(resolution);
    let lat_step = bounds.height() / f64::from(resolution);

    let mut overflowed = vec![false; samples.len()];
    let mut empty_cells = 0usize;
    for i in 0..steps {
        let lon = bounds.min_lon + i as f64 * lon_step;
        for j in 0..steps {
            let lat = bounds.min_lat + j as f64 * lat_step;

            match idw_estimate(lon, lat, &samples, &mut overflowed) {
                Some(value) => {
                    grid.push(SamplePoint::new(lon, lat, value, Provenance::Synthesized))
                }
                None => {
                    empty_cells += 1;
                    skipped.record(SkipReason::NonFiniteResult);
                }
            }
        }
    }

    let overflowed_samples = overflowed.iter().filter(|&&o| o).count();
    for _ in 0..overflowed_samples {
        skipped.record(SkipReason::NonFiniteResult);
    }
    if overflowed_samples > 0 {
        warn!(
            samples = overflowed_samples,
            "Samples with overflowing contributions were left out of estimates"
        );
    }

    if empty_cells > 0 {
        warn!(empty_cells, "Grid points without a usable estimate were dropped");
    }

    debug!(
        samples = samples.len(),
        resolution,
        grid_points = grid.len(),
        min_lon = bounds.min_lon,
        max_lon = bounds.max_lon,
        min_lat = bounds.min_lat,
        max_lat = bounds.max_lat,
        "Density grid complete"
    );

    Ok(EngineOutput {
        collection: PointCollection::new(grid).with_envelope(bounds),
        skipped,
    })
}

/// Inverse-distance weight of a sample at distance `distance`.
#[inline]
pub fn idw_weight(distance: f64) -> f64 {
    if distance < COINCIDENT_DISTANCE {
        COINCIDENT_WEIGHT
    } else {
        1.0 / (distance * distance)
    }
}

/// IDW estimate at (lon, lat), or `None` when no sample carries weight.
///
/// A sample whose weighted contribution is not finite is left out (zero
/// weight) and flagged in `overflowed`, which is indexed like `samples`.
fn idw_estimate(
    lon: f64,
    lat: f64,
    samples: &[SamplePoint],
    overflowed: &mut [bool],
) -> Option<f64> {
    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;

    for (sample, flag) in samples.iter().zip(overflowed.iter_mut()) {
        let dx = lon - sample.lon;
        let dy = lat - sample.lat;
        let weight = idw_weight((dx * dx + dy * dy).sqrt());
        let contribution = weight * sample.value;

        if !weight.is_finite() || !contribution.is_finite() {
            *flag = true;
            continue;
        }

        weighted_sum += contribution;
        weight_sum += weight;
    }

    if weight_sum == 0.0 {
        return None;
    }

    let value = weighted_sum / weight_sum;
    value.is_finite().then_some(value)
}
