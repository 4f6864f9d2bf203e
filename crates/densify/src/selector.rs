//! Zoom-based engine selection and the end-to-end `densify` entry point.

use aqi_common::{OutputMetadata, PointCollection, RawSample, SkipCounts};
use chrono::Utc;
use serde::Serialize;
use std::fmt;
use tracing::info;

use crate::config::DensificationConfig;
use crate::error::Result;
use crate::grid::synthesize;
use crate::interpolate::interpolate;
use crate::normalize::normalize_all;

/// Which densification engine produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Engine {
    /// IDW lattice, used below the zoom threshold.
    DensityGrid,
    /// Neighbor-edge interpolation, used at or above the threshold.
    NeighborInterpolation,
}

impl Engine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DensityGrid => "density_grid",
            Self::NeighborInterpolation => "neighbor_interpolation",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Choose the engine for a zoom level.
///
/// `zoom < threshold` selects the density grid. A NaN zoom fails the
/// comparison and selects interpolation.
pub fn select(zoom: f64, config: &DensificationConfig) -> Engine {
    if zoom < config.zoom_threshold {
        Engine::DensityGrid
    } else {
        Engine::NeighborInterpolation
    }
}

/// Raw result of a single engine run.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOutput {
    pub collection: PointCollection,
    /// Points or estimates the engine had to leave out.
    pub skipped: SkipCounts,
}

/// Summary of one `densify` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensifyReport {
    pub engine: Engine,
    pub zoom: f64,
    /// Raw samples handed in, before normalization.
    pub input_count: usize,
    pub output_count: usize,
    /// Normalization and engine skips combined.
    pub skipped: SkipCounts,
}

impl DensifyReport {
    /// Metadata block for a GeoJSON output document.
    pub fn to_metadata(&self) -> OutputMetadata {
        OutputMetadata {
            engine: self.engine.as_str().to_string(),
            input_count: self.input_count,
            output_count: self.output_count,
            skipped: self.skipped.clone(),
            generated_at: Utc::now(),
        }
    }
}

/// Densified points plus the run summary.
#[derive(Debug, Clone, PartialEq)]
pub struct DensifyOutcome {
    pub collection: PointCollection,
    pub report: DensifyReport,
}

/// Normalize `samples`, pick an engine for `zoom` and run it.
///
/// Returns `Err` only for invalid configuration or an output buffer that
/// cannot be allocated; individual bad samples are skipped and reported.
pub fn densify(
    samples: &[RawSample],
    zoom: f64,
    config: &DensificationConfig,
) -> Result<DensifyOutcome> {
    config.validate()?;

    let (normalized, mut skipped) = normalize_all(samples);
    let engine = select(zoom, config);

    let output = match engine {
        Engine::DensityGrid => synthesize(&normalized, config.grid_resolution_low_zoom)?,
        Engine::NeighborInterpolation => {
            interpolate(&normalized, &config.interpolation_options())?
        }
    };
    skipped.merge(&output.skipped);

    let report = DensifyReport {
        engine,
        zoom,
        input_count: samples.len(),
        output_count: output.collection.len(),
        skipped,
    };

    info!(
        engine = %report.engine,
        zoom,
        input = report.input_count,
        output = report.output_count,
        skipped = report.skipped.total(),
        "Densification complete"
    );

    Ok(DensifyOutcome {
        collection: output.collection,
        report,
    })
}
