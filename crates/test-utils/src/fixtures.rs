//! Common test fixtures for heatmap tests.
//!
//! This module provides pre-defined data that represents common scenarios
//! in air-quality densification.

use aqi_common::RawSample;

/// Common bounding box definitions for testing.
pub mod bbox {
    /// Delhi NCR viewing region `(min_lon, min_lat, max_lon, max_lat)`.
    pub const DELHI: (f64, f64, f64, f64) = (76.8, 28.3, 77.5, 29.0);
}

/// Map center of the Delhi view `(lon, lat)`.
pub const DELHI_CENTER: (f64, f64) = (77.1025, 28.65);

/// Zoom level above the default threshold (interpolation path).
pub const HIGH_ZOOM: f64 = 14.0;

/// Zoom level below the default threshold (density grid path).
pub const LOW_ZOOM: f64 = 9.0;

/// Two stations about 1.4 km apart with Good and USG readings.
pub fn two_station_samples() -> Vec<RawSample> {
    vec![
        RawSample::new(77.10, 28.65, 50.0),
        RawSample::new(77.11, 28.66, 150.0),
    ]
}

/// Two stations roughly 1 km apart inside a single 0.01 degree index cell.
pub fn same_cell_samples() -> Vec<RawSample> {
    vec![
        RawSample::new(77.101, 28.651, 40.0),
        RawSample::new(77.109, 28.659, 160.0),
    ]
}

/// Samples with every kind of bad record mixed between valid ones.
pub fn dirty_samples() -> Vec<RawSample> {
    vec![
        RawSample::new(77.10, 28.65, 80.0),
        RawSample::new(f64::NAN, 28.65, 80.0),
        RawSample::new(77.101, f64::INFINITY, 80.0),
        RawSample::new(77.102, 28.652, f64::NAN),
        RawSample::new(77.103, 28.653, 120.0),
    ]
}
