//! # imgbuf
//!
//! In-memory image buffer with a fixed-arity pixel view and explicit
//! ownership of its pixel memory.
//!
//! [`ImageBuffer<N>`] holds `N`-channel 8-bit pixels (`N` in 1..=4, checked
//! at compile time). It decodes files through a [`Codec`], resizes through
//! a [`Resampler`], and can hand its memory to the caller
//! ([`release`](ImageBuffer::release)) or adopt memory the caller owns
//! ([`from_buffer`](ImageBuffer::from_buffer)) without copying.
//!
//! # Quick Start
//!
//! ```rust
//! use imgbuf::prelude::*;
//!
//! let black = vec![Pixel3::default(); 4 * 2];
//! let image = ImageBuffer3::from_pixels(black, 4, 2)?;
//!
//! let mut small = image.resize(2, 1)?;
//! let memory = small.release()?;
//! assert!(!small.is_valid());
//!
//! let again = ImageBuffer3::from_buffer(memory, 2, 1)?;
//! assert_eq!(again[(1, 0)], Pixel3::new([0, 0, 0]));
//! # Ok::<(), imgbuf::ImageError>(())
//! ```
//!
//! # Crates
//!
//! - `imgbuf-core` - [`Pixel`], [`PixelBuffer`], [`BufferState`]
//! - `imgbuf-io` - PNG, JPEG and BMP codec service
//! - `imgbuf-ops` - sRGB-aware resampling service

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod image;

pub use error::{ImageError, ImageResult};
pub use image::ImageBuffer;

pub use imgbuf_core::{BufferState, Error, MAX_CHANNELS, Pixel, PixelBuffer};
pub use imgbuf_core::{Pixel1, Pixel2, Pixel3, Pixel4};
pub use imgbuf_io::{Codec, CodecOptions, FileCodec, Format, IoError};
pub use imgbuf_ops::{ChannelLayout, Extent, Filter, OpsError, Resampler, SrgbResampler};

/// Re-export of the codec crate.
pub use imgbuf_io as io;
/// Re-export of the resampling crate.
pub use imgbuf_ops as ops;

/// One-channel (gray) image.
pub type ImageBuffer1 = ImageBuffer<1>;
/// Two-channel (gray + alpha) image.
pub type ImageBuffer2 = ImageBuffer<2>;
/// Three-channel (RGB) image.
pub type ImageBuffer3 = ImageBuffer<3>;
/// Four-channel (RGBA) image.
pub type ImageBuffer4 = ImageBuffer<4>;

/// Common imports.
pub mod prelude {
    pub use crate::{BufferState, ImageError, ImageResult, Pixel, PixelBuffer};
    pub use crate::{Codec, Format, Resampler};
    pub use crate::{ImageBuffer, ImageBuffer1, ImageBuffer2, ImageBuffer3, ImageBuffer4};
    pub use crate::{Pixel1, Pixel2, Pixel3, Pixel4};
}
