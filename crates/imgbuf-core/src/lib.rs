//! # imgbuf-core
//!
//! Core types for the imgbuf workspace.
//!
//! - [`Pixel`] - `N` interleaved 8-bit channels, `N` fixed at compile time
//! - [`PixelBuffer`] - single-owner sequence of pixels
//! - [`BufferState`] - ownership state of an image buffer
//! - [`Error`] - contract violations (state, bounds, size, arity)
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. The other crates build on it:
//!
//! ```text
//! imgbuf-core (this crate)
//!    ^
//!    |
//!    +-- imgbuf-io  (codec service)
//!    +-- imgbuf-ops (resampling service)
//!    +-- imgbuf     (ImageBuffer ownership state machine)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;
pub mod pixel;

pub use buffer::{BufferState, PixelBuffer};
pub use error::{Error, Result};
pub use pixel::{MAX_CHANNELS, Pixel, Pixel1, Pixel2, Pixel3, Pixel4};
