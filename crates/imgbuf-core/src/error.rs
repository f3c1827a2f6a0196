//! Error types for imgbuf-core operations.
//!
//! Every variant here describes a contract violation by the caller: touching
//! a buffer that owns no memory, indexing outside the image or the pixel,
//! or handing over memory whose size disagrees with the stated dimensions.
//! I/O and resampling failures live in `imgbuf-io` and `imgbuf-ops`.
//!
//! # Usage
//!
//! ```rust
//! use imgbuf_core::{Error, Result};
//!
//! fn check(x: usize, y: usize, width: usize, height: usize) -> Result<()> {
//!     if x >= width || y >= height {
//!         return Err(Error::out_of_bounds(x, y, width, height));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check(4, 0, 4, 2).unwrap_err().is_bounds_error());
//! ```

use crate::BufferState;
use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by pixel and buffer operations.
///
/// # Categories
///
/// - **State errors**: [`InvalidState`](Error::InvalidState)
/// - **Bounds errors**: [`OutOfBounds`](Error::OutOfBounds),
///   [`ChannelOutOfBounds`](Error::ChannelOutOfBounds)
/// - **Size errors**: [`SizeMismatch`](Error::SizeMismatch),
///   [`Arity`](Error::Arity), [`InvalidLength`](Error::InvalidLength)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The operation needs an owned buffer but the instance is empty or released.
    #[error("cannot {operation}: image buffer is {state}")]
    InvalidState {
        /// Name of the rejected operation
        operation: &'static str,
        /// State the buffer was in
        state: BufferState,
    },

    /// Pixel coordinates are outside image bounds.
    #[error("pixel ({x}, {y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// Column that was accessed
        x: usize,
        /// Row that was accessed
        y: usize,
        /// Image width
        width: usize,
        /// Image height
        height: usize,
    },

    /// Channel index is outside `[0, channels)`.
    #[error("channel {index} out of bounds for {channels}-channel pixel")]
    ChannelOutOfBounds {
        /// Index that was accessed
        index: usize,
        /// Pixel arity
        channels: usize,
    },

    /// Adopted pixel count does not match `width * height`.
    #[error("size mismatch: expected {expected} pixels, got {got}")]
    SizeMismatch {
        /// Pixel count implied by the dimensions
        expected: usize,
        /// Pixel count supplied
        got: usize,
    },

    /// A pixel was built from the wrong number of channel values.
    #[error("arity mismatch: expected {expected} channels, got {got}")]
    Arity {
        /// Pixel arity
        expected: usize,
        /// Number of values supplied
        got: usize,
    },

    /// Raw sample storage is not a whole number of pixels.
    #[error("{len} samples do not form whole {channels}-channel pixels")]
    InvalidLength {
        /// Number of samples supplied
        len: usize,
        /// Pixel arity
        channels: usize,
    },
}

impl Error {
    /// Creates an [`Error::InvalidState`] error.
    #[inline]
    pub fn invalid_state(operation: &'static str, state: BufferState) -> Self {
        Self::InvalidState { operation, state }
    }

    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::SizeMismatch`] error.
    #[inline]
    pub fn size_mismatch(expected: usize, got: usize) -> Self {
        Self::SizeMismatch { expected, got }
    }

    /// Returns `true` for pixel or channel bounds errors.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(
            self,
            Self::OutOfBounds { .. } | Self::ChannelOutOfBounds { .. }
        )
    }

    /// Returns `true` if the buffer was not in the owned state.
    #[inline]
    pub fn is_state_error(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds() {
        let err = Error::out_of_bounds(100, 50, 80, 60);
        let msg = err.to_string();
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
        assert!(msg.contains("80x60"));
        assert!(err.is_bounds_error());
        assert!(!err.is_state_error());
    }

    #[test]
    fn test_invalid_state_message() {
        let err = Error::invalid_state("write", BufferState::Released);
        assert_eq!(err.to_string(), "cannot write: image buffer is released");
        assert!(err.is_state_error());
    }

    #[test]
    fn test_size_mismatch() {
        let err = Error::size_mismatch(8, 6);
        assert!(err.to_string().contains("expected 8 pixels, got 6"));
        assert!(!err.is_bounds_error());
    }
}
