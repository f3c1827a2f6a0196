//! # imgbuf-ops
//!
//! Resampling service for imgbuf.
//!
//! # Modules
//!
//! - [`resampler`] - The [`Resampler`] contract and [`SrgbResampler`]
//! - [`resize`] - Separable f32 resize and filter kernels
//! - [`srgb`] - sRGB transfer function and 8-bit tables
//!
//! # Example
//!
//! ```rust
//! use imgbuf_ops::{ChannelLayout, Extent, Resampler, SrgbResampler};
//!
//! let src = vec![0u8; 4 * 2 * 3];
//! let layout = ChannelLayout::Rgb;
//! let dst = SrgbResampler::new()
//!     .resize(&src, Extent::packed(4, 2, 3), Extent::packed(2, 1, 3), layout)
//!     .unwrap();
//! assert_eq!(dst, vec![0u8; 6]);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod resampler;
pub mod resize;
pub mod srgb;

pub use error::{OpsError, OpsResult};
pub use resampler::{ChannelLayout, Extent, Resampler, SrgbResampler};
pub use resize::Filter;
