//! Spatial Densification Engine
//!
//! Turns a sparse set of air-quality samples into a dense point set that a
//! heatmap renderer can draw smoothly. Two engines are available and one is
//! picked per call from the current zoom level:
//!
//! - **Density grid** (low zoom): a fixed `(R+1) x (R+1)` lattice over the
//!   padded sample envelope, each lattice point an inverse-distance-weighted
//!   average of every sample.
//! - **Neighbor interpolation** (high zoom): the original samples plus
//!   synthetic points inserted along edges between samples that fall in
//!   adjacent quantized cells.
//!
//! # Architecture
//!
//! ```text
//! [RawSample]
//!      │
//!      ▼
//! normalize_all()  ── rejects non-finite input, tallies SkipReason
//!      │
//!      ▼
//! select(zoom) ──┬─► zoom <  threshold: synthesize(collection, resolution)
//!                │
//!                └─► zoom >= threshold: interpolate(collection, factor)
//!                                            │
//!                                            └─► SpatialIndex (UniformGridIndex)
//!      │
//!      ▼
//! DensifyOutcome { collection, report }
//! ```
//!
//! Every call is pure: nothing is cached between calls and no state is
//! shared, so callers may run it on any thread and simply drop results that
//! have gone stale.
//!
//! # Example
//!
//! ```
//! use aqi_common::RawSample;
//! use densify::{densify, DensificationConfig, Engine};
//!
//! let samples = [
//!     RawSample::new(77.10, 28.65, 50.0),
//!     RawSample::new(77.11, 28.66, 150.0),
//! ];
//! let outcome = densify(&samples, 9.0, &DensificationConfig::default()).unwrap();
//! assert_eq!(outcome.report.engine, Engine::DensityGrid);
//! assert_eq!(outcome.collection.len(), 41 * 41);
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod index;
pub mod interpolate;
pub mod normalize;
pub mod selector;

// Re-export commonly used types at crate root
pub use config::DensificationConfig;
pub use error::{DensifyError, Result};
pub use grid::synthesize;
pub use index::{CellKey, SpatialIndex, UniformGridIndex};
pub use interpolate::{interpolate, interpolate_with, InterpolationOptions};
pub use normalize::{category_info, normalize, normalize_all};
pub use selector::{densify, select, DensifyOutcome, DensifyReport, Engine, EngineOutput};
