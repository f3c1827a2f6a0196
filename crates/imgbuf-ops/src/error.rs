//! Error types for resampling.

use thiserror::Error;

/// Error type for resampling operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OpsError {
    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Buffer length does not match its extent.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Operation not supported for this layout.
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

/// Result type for resampling operations.
pub type OpsResult<T> = Result<T, OpsError>;
