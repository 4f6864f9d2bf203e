//! Common types shared across the air-quality heatmap workspace.

pub mod bbox;
pub mod category;
pub mod error;
pub mod geojson;
pub mod point;

pub use bbox::BoundingBox;
pub use category::{category, AqiCategory, CategoryInfo, ALL_CATEGORIES};
pub use error::{AqiError, AqiResult};
pub use geojson::{FeatureCollection, OutputMetadata};
pub use point::{
    intensity, PointCollection, Provenance, RawSample, SamplePoint, SkipCounts, SkipReason,
    INTENSITY_SCALE,
};
