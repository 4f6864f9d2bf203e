//! Configuration for the densification engines.

use serde::{Deserialize, Serialize};

use crate::error::{DensifyError, Result};
use crate::interpolate::InterpolationOptions;

/// Explicit engine configuration, built once by the owning application and
/// passed into every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensificationConfig {
    /// Zoom below which the density grid is used instead of interpolation.
    pub zoom_threshold: f64,

    /// Cells per axis of the density grid (the lattice has `+1` points per axis).
    pub grid_resolution_low_zoom: u32,

    /// Segments per neighbor edge; `factor - 1` points are inserted per edge.
    pub interpolation_factor_high_zoom: u32,

    /// Process each neighbor pair once instead of from both ends.
    ///
    /// Off by default: the doubled segments are part of the expected
    /// visual density.
    pub dedupe_edges: bool,
}

impl Default for DensificationConfig {
    fn default() -> Self {
        Self {
            zoom_threshold: 12.0,
            grid_resolution_low_zoom: 40,
            interpolation_factor_high_zoom: 3,
            dedupe_edges: false,
        }
    }
}

impl DensificationConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup (environment-variable names).
    ///
    /// Unparseable values are ignored and the current value is kept.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("HEATMAP_ZOOM_THRESHOLD") {
            if let Ok(threshold) = val.parse() {
                self.zoom_threshold = threshold;
            }
        }

        if let Some(val) = lookup("HEATMAP_GRID_RESOLUTION") {
            if let Ok(resolution) = val.parse() {
                self.grid_resolution_low_zoom = resolution;
            }
        }

        if let Some(val) = lookup("HEATMAP_INTERPOLATION_FACTOR") {
            if let Ok(factor) = val.parse() {
                self.interpolation_factor_high_zoom = factor;
            }
        }

        if let Some(val) = lookup("HEATMAP_DEDUPE_EDGES") {
            self.dedupe_edges = val.to_lowercase() == "true" || val == "1";
        }

        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.zoom_threshold.is_finite() {
            return Err(DensifyError::invalid_config(
                "zoom_threshold must be a finite number",
            ));
        }

        if self.grid_resolution_low_zoom == 0 {
            return Err(DensifyError::invalid_config(
                "grid_resolution_low_zoom must be >= 1",
            ));
        }

        if self.interpolation_factor_high_zoom < 2 {
            return Err(DensifyError::invalid_config(
                "interpolation_factor_high_zoom must be >= 2",
            ));
        }

        Ok(())
    }

    /// Interpolator settings derived from this configuration.
    pub fn interpolation_options(&self) -> InterpolationOptions {
        InterpolationOptions {
            factor: self.interpolation_factor_high_zoom,
            dedupe_edges: self.dedupe_edges,
        }
    }
}
