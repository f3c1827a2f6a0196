//! # imgbuf-io
//!
//! Codec service for imgbuf: decodes image files into interleaved 8-bit
//! samples and encodes interleaved 8-bit samples back to files.
//!
//! - **PNG** - Lossless with alpha support
//! - **JPEG** - Lossy, quality setting
//! - **BMP** - Uncompressed Windows bitmap
//!
//! # Architecture
//!
//! - [`Codec`] - Trait the image buffer calls for all file traffic
//! - [`FileCodec`] - Default implementation dispatching on [`Format`]
//! - [`read`] / [`write`] - Free functions with format detection
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use imgbuf_io::{read, write};
//!
//! let image = read("input.png")?;
//! write("output.bmp", image.as_raw())?;
//! ```
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Channels written |
//! |--------|------|-------|------------------|
//! | PNG | Yes | Yes | 1-4 |
//! | JPEG | Yes | Yes | 1 or 3 (alpha dropped) |
//! | BMP | Yes | Yes | 3 or 4 |
//!
//! # Feature Flags
//!
//! - `png` - PNG support (default)
//! - `jpeg` - JPEG support (default)
//! - `bmp` - BMP support (default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod codec;
pub mod convert;
mod detect;
mod error;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "jpeg")]
pub mod jpeg;

#[cfg(feature = "bmp")]
pub mod bmp;

pub use codec::{Codec, CodecOptions, FileCodec};
pub use convert::convert_channels;
pub use detect::Format;
pub use error::{IoError, IoResult};

use std::path::Path;
use tracing::debug;

/// Decoded 8-bit image with interleaved samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Channels per pixel in `data`.
    pub channels: u32,
    /// Channels the file itself stores, before any conversion.
    pub native_channels: u32,
    /// Interleaved samples, row-major, `width * height * channels` bytes.
    pub data: Vec<u8>,
}

impl ImageData {
    /// Wraps decoded samples, checking the length against the dimensions.
    ///
    /// `native_channels` starts equal to `channels`.
    pub fn new(width: u32, height: u32, channels: u32, data: Vec<u8>) -> IoResult<Self> {
        convert::check_channels(channels)?;
        let expected = sample_count(width, height, channels)?;
        if data.len() != expected {
            return Err(IoError::DimensionMismatch {
                expected: format!("{width}x{height}x{channels} = {expected} samples"),
                actual: data.len().to_string(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            native_channels: channels,
            data,
        })
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Number of samples (`pixel_count * channels`).
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.data.len()
    }

    /// Borrows the samples as an encoder input.
    pub fn as_raw(&self) -> RawImage<'_> {
        RawImage {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: &self.data,
        }
    }

    /// Converts the samples to `channels` per pixel in place.
    pub fn into_channels(mut self, channels: u32) -> IoResult<Self> {
        self.data = convert_channels(self.data, self.channels, channels)?;
        self.channels = channels;
        Ok(self)
    }
}

/// Borrowed interleaved 8-bit samples handed to an encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawImage<'a> {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Channels per pixel (1-4).
    pub channels: u32,
    /// `width * height * channels` samples.
    pub data: &'a [u8],
}

impl<'a> RawImage<'a> {
    /// Borrows `data`, checking its length against the dimensions.
    pub fn new(width: u32, height: u32, channels: u32, data: &'a [u8]) -> IoResult<Self> {
        convert::check_channels(channels)?;
        let expected = sample_count(width, height, channels)?;
        if data.len() != expected {
            return Err(IoError::DimensionMismatch {
                expected: format!("{width}x{height}x{channels} = {expected} samples"),
                actual: data.len().to_string(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }
}

fn sample_count(width: u32, height: u32, channels: u32) -> IoResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels as usize))
        .ok_or_else(|| IoError::InvalidFile(format!("{width}x{height}x{channels} overflows")))
}

/// Reads an image file, detecting the format from magic bytes and then
/// the extension.
///
/// Samples come back in the file's own channel count.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The format is not recognized or its feature is disabled
/// - The file is corrupted
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    debug!(path = %path.display(), %format, "reading image");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::read(path),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read(path),

        #[cfg(feature = "bmp")]
        Format::Bmp => bmp::read(path),

        _ => Err(IoError::UnsupportedFormat(format!(
            "cannot read {}: {} format",
            path.display(),
            format
        ))),
    }
}

/// Decodes an image held in memory, detecting the format from magic bytes.
pub fn read_from_memory(bytes: &[u8]) -> IoResult<ImageData> {
    let format = Format::from_bytes(bytes);

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::read_from_memory(bytes),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read_from_memory(bytes),

        #[cfg(feature = "bmp")]
        Format::Bmp => bmp::read_from_memory(bytes),

        _ => Err(IoError::UnsupportedFormat(format!("{format} data in memory"))),
    }
}

/// Writes an image, choosing the format from the file extension.
///
/// # Errors
///
/// [`IoError::UnsupportedFormat`] when the extension is missing or unknown.
pub fn write<P: AsRef<Path>>(path: P, image: RawImage<'_>) -> IoResult<()> {
    let path = path.as_ref();
    write_as(path, Format::from_extension(path), image)
}

/// Writes an image in an explicit format, ignoring the extension.
pub fn write_as<P: AsRef<Path>>(path: P, format: Format, image: RawImage<'_>) -> IoResult<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), %format, width = image.width, height = image.height, "writing image");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::write(path, image),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::write(path, image),

        #[cfg(feature = "bmp")]
        Format::Bmp => bmp::write(path, image),

        _ => Err(IoError::UnsupportedFormat(format!(
            "cannot write {}: {} format",
            path.display(),
            format
        ))),
    }
}

/// Encodes an image to bytes in the given format with default settings.
pub fn write_to_memory(format: Format, image: RawImage<'_>) -> IoResult<Vec<u8>> {
    match format {
        #[cfg(feature = "png")]
        Format::Png => png::write_to_memory(image, png::PngCompression::default()),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::JpegWriter::new().write_to_memory(image),

        #[cfg(feature = "bmp")]
        Format::Bmp => bmp::write_to_memory(image),

        _ => Err(IoError::UnsupportedFormat(format!("cannot encode {format}"))),
    }
}
