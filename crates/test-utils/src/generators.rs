//! Sample generators for creating synthetic air-quality data.
//!
//! These generators create predictable, verifiable sample patterns that can
//! be used across the test suite and benchmarks. None of them use
//! randomness.

use aqi_common::geojson::{Feature, FeatureCollection};
use aqi_common::RawSample;
use std::io::Write;
use tempfile::NamedTempFile;

/// Creates a regular lattice of samples over a region.
///
/// Mirrors the shape of the fallback data the frontend showed when the API
/// was unreachable: a `grid_size x grid_size` lattice whose value rises by
/// 10 per step along both axes from a base of 50, clamped to `[0, 500]`.
///
/// # Arguments
///
/// * `bounds` - `(min_lon, min_lat, max_lon, max_lat)`
/// * `grid_size` - Samples per axis (at least 2)
///
/// # Example
///
/// ```
/// use test_utils::create_mock_samples;
///
/// let samples = create_mock_samples((0.0, 0.0, 1.0, 1.0), 3);
/// assert_eq!(samples.len(), 9);
/// assert_eq!(samples[0].value, 50.0);
/// assert_eq!(samples[8].value, 90.0);
/// ```
pub fn create_mock_samples(bounds: (f64, f64, f64, f64), grid_size: usize) -> Vec<RawSample> {
    let (min_lon, min_lat, max_lon, max_lat) = bounds;
    let denom = grid_size.saturating_sub(1).max(1) as f64;
    let mut samples = Vec::with_capacity(grid_size * grid_size);

    for i in 0..grid_size {
        for j in 0..grid_size {
            let lat = min_lat + (max_lat - min_lat) * (i as f64 / denom);
            let lon = min_lon + (max_lon - min_lon) * (j as f64 / denom);
            let value = (50.0 + (i + j) as f64 * 10.0).clamp(0.0, 500.0);
            samples.push(RawSample::new(lon, lat, value));
        }
    }
    samples
}

/// Creates `count` samples spread along a line with linearly rising values.
///
/// Consecutive samples are `spacing` degrees apart in longitude, so a
/// spacing below 0.01 keeps neighbors within adjacent index cells.
pub fn create_line_samples(
    start: (f64, f64),
    spacing: f64,
    count: usize,
    value_step: f64,
) -> Vec<RawSample> {
    (0..count)
        .map(|k| {
            RawSample::new(
                start.0 + k as f64 * spacing,
                start.1,
                k as f64 * value_step,
            )
        })
        .collect()
}

/// Creates a cluster of samples around a center on concentric rings.
///
/// Values fall off linearly from `peak` at the center towards zero at the
/// outermost ring, like a plume around a point source.
pub fn create_plume_samples(
    center: (f64, f64),
    rings: usize,
    per_ring: usize,
    ring_spacing: f64,
    peak: f64,
) -> Vec<RawSample> {
    let mut samples = vec![RawSample::new(center.0, center.1, peak)];
    for ring in 1..=rings {
        let radius = ring as f64 * ring_spacing;
        let value = peak * (1.0 - ring as f64 / (rings as f64 + 1.0));
        for k in 0..per_ring {
            let theta = std::f64::consts::TAU * k as f64 / per_ring as f64;
            samples.push(RawSample::new(
                center.0 + radius * theta.cos(),
                center.1 + radius * theta.sin(),
                value,
            ));
        }
    }
    samples
}

/// Wrap samples as a GeoJSON FeatureCollection with an `aqi` property.
pub fn samples_to_geojson(samples: &[RawSample]) -> FeatureCollection {
    let mut collection = FeatureCollection::new();
    collection.features = samples
        .iter()
        .map(|s| Feature::point(s.lon, s.lat, s.value))
        .collect();
    collection
}

/// Write `json` to a fresh temporary file and return its handle.
pub fn write_temp_json(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(json.as_bytes())
        .expect("Failed to write temp file");
    file
}
