//! Error type for image buffer operations.
//!
//! [`ImageError`] gathers the three failure sources an [`ImageBuffer`]
//! can hit: contract violations from `imgbuf-core`, codec failures from
//! `imgbuf-io`, and resampler failures from `imgbuf-ops`.
//!
//! [`ImageBuffer`]: crate::ImageBuffer

use imgbuf_core::Error as BufferError;
use imgbuf_io::IoError;
use imgbuf_ops::OpsError;
use thiserror::Error;

/// Result type for image buffer operations.
pub type ImageResult<T> = Result<T, ImageError>;

/// Image buffer error.
#[derive(Debug, Error)]
pub enum ImageError {
    /// State, bounds or size contract violated.
    #[error(transparent)]
    Buffer(#[from] BufferError),

    /// Decoding or encoding failed.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Resampling failed.
    #[error(transparent)]
    Ops(#[from] OpsError),
}

impl ImageError {
    /// Returns `true` if the buffer was empty or released.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::Buffer(e) if e.is_state_error())
    }

    /// Returns `true` for pixel or channel bounds errors.
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::Buffer(e) if e.is_bounds_error())
    }

    /// Returns `true` for codec failures.
    pub fn is_codec_error(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
