//! Error types for the heatmap workspace.

use thiserror::Error;

/// Result type alias using AqiError.
pub type AqiResult<T> = Result<T, AqiError>;

/// Errors raised while reading or writing sample data.
#[derive(Debug, Error)]
pub enum AqiError {
    #[error("Invalid GeoJSON: {0}")]
    InvalidGeoJson(String),

    #[error("Unsupported GeoJSON object type: {0}")]
    UnsupportedType(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for AqiError {
    fn from(err: std::io::Error) -> Self {
        AqiError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AqiError {
    fn from(err: serde_json::Error) -> Self {
        AqiError::InvalidGeoJson(err.to_string())
    }
}
