//! Error types for codec operations.
//!
//! Provides unified error handling for all image format operations.

use std::io;
use thiserror::Error;

/// Codec operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported or undetectable format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Invalid or corrupted file.
    #[error("invalid file: {0}")]
    InvalidFile(String),

    /// Decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Sample count does not match the stated dimensions.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected size.
        expected: String,
        /// Actual size.
        actual: String,
    },

    /// Unsupported bit depth or color type.
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(String),

    /// Channel count outside 1..=4.
    #[error("unsupported channel count: {0}")]
    UnsupportedChannels(u32),
}

impl IoError {
    /// Returns `true` if the underlying file could not be opened or read.
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

/// Result type for codec operations.
pub type IoResult<T> = Result<T, IoError>;
