//! Codec trait and the default file codec.
//!
//! The image buffer never touches format modules directly; every decode
//! and encode goes through a [`Codec`], so tests and callers can swap in
//! their own.

use crate::{Format, ImageData, IoError, IoResult, RawImage};
use std::path::Path;
use tracing::debug;

#[cfg(feature = "png")]
use crate::png::PngCompression;

/// Decode and encode contract used by the image buffer.
///
/// Decoders must return exactly `desired_channels` channels per pixel and
/// record the file's own channel count in [`ImageData::native_channels`].
pub trait Codec {
    /// Decodes the file at `path` into `desired_channels` 8-bit channels.
    fn decode(&self, path: &Path, desired_channels: u32) -> IoResult<ImageData>;

    /// Decodes an encoded image held in memory.
    fn decode_memory(&self, bytes: &[u8], desired_channels: u32) -> IoResult<ImageData>;

    /// Encodes `image` to `path` in `format`.
    fn encode(&self, path: &Path, format: Format, image: RawImage<'_>) -> IoResult<()>;
}

/// Encoder settings for [`FileCodec`].
#[derive(Debug, Clone)]
pub struct CodecOptions {
    /// JPEG quality (1-100).
    pub jpeg_quality: u8,
    /// PNG compression effort.
    #[cfg(feature = "png")]
    pub png_compression: PngCompression,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: 90,
            #[cfg(feature = "png")]
            png_compression: PngCompression::default(),
        }
    }
}

impl CodecOptions {
    /// Sets the JPEG quality.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    /// Sets the PNG compression effort.
    #[cfg(feature = "png")]
    pub fn with_png_compression(mut self, compression: PngCompression) -> Self {
        self.png_compression = compression;
        self
    }
}

/// Codec backed by the PNG, JPEG and BMP modules of this crate.
#[derive(Debug, Clone, Default)]
pub struct FileCodec {
    options: CodecOptions,
}

impl FileCodec {
    /// Creates a codec with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a codec with the given options.
    pub fn with_options(options: CodecOptions) -> Self {
        Self { options }
    }

    /// Returns the encoder options.
    pub fn options(&self) -> &CodecOptions {
        &self.options
    }
}

impl Codec for FileCodec {
    fn decode(&self, path: &Path, desired_channels: u32) -> IoResult<ImageData> {
        let image = crate::read(path)?;
        debug!(
            path = %path.display(),
            width = image.width,
            height = image.height,
            native_channels = image.native_channels,
            desired_channels,
            "decoded image"
        );
        image.into_channels(desired_channels)
    }

    fn decode_memory(&self, bytes: &[u8], desired_channels: u32) -> IoResult<ImageData> {
        let image = crate::read_from_memory(bytes)?;
        debug!(
            width = image.width,
            height = image.height,
            native_channels = image.native_channels,
            desired_channels,
            "decoded image from memory"
        );
        image.into_channels(desired_channels)
    }

    fn encode(&self, path: &Path, format: Format, image: RawImage<'_>) -> IoResult<()> {
        match format {
            #[cfg(feature = "png")]
            Format::Png => crate::png::write_with(path, image, self.options.png_compression),

            #[cfg(feature = "jpeg")]
            Format::Jpeg => crate::jpeg::JpegWriter::with_options(crate::jpeg::JpegWriterOptions {
                quality: self.options.jpeg_quality,
            })
            .write(path, image),

            _ => crate::write_as(path, format, image).map_err(|e| match e {
                IoError::UnsupportedFormat(_) => IoError::UnsupportedFormat(format!(
                    "no encoder for {} ({})",
                    format,
                    path.display()
                )),
                other => other,
            }),
        }
    }
}
