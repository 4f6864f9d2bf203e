//! Error types for densification.

use thiserror::Error;

/// Fatal densification errors.
///
/// Bad individual points are never reported here; they are skipped and
/// counted. An `Err` means the whole call produced nothing usable and the
/// caller should fall back to the raw samples.
#[derive(Error, Debug)]
pub enum DensifyError {
    /// A configuration value is outside its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The output buffer could not be reserved.
    #[error("failed to allocate {requested} output points: {message}")]
    Allocation { requested: usize, message: String },
}

impl DensifyError {
    /// Create an InvalidConfig error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an Allocation error.
    pub fn allocation(requested: usize, msg: impl Into<String>) -> Self {
        Self::Allocation {
            requested,
            message: msg.into(),
        }
    }
}

/// Result type for densification operations.
pub type Result<T> = std::result::Result<T, DensifyError>;
