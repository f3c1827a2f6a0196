//! PNG format support.
//!
//! Reads every PNG color type and bit depth: palettes and sub-byte depths
//! are expanded, 16-bit samples are stripped to 8 bits. Writes 8-bit gray,
//! gray + alpha, RGB and RGBA with an sRGB chunk.
//!
//! # Example
//!
//! ```rust,ignore
//! use imgbuf_io::png;
//!
//! let image = png::read("input.png")?;
//! png::write("output.png", image.as_raw())?;
//! ```

use crate::{ImageData, IoError, IoResult, RawImage};
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

/// Compression effort for written PNG files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PngCompression {
    /// Encoder default (balanced size and speed).
    #[default]
    Default,
    /// Faster encoding, larger files.
    Fast,
}

impl PngCompression {
    fn to_png(self) -> png::Compression {
        match self {
            PngCompression::Default => png::Compression::default(),
            PngCompression::Fast => png::Compression::Fast,
        }
    }
}

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let data = std::fs::read(path.as_ref())?;
    read_from_memory(&data)
}

/// Decodes a PNG held in memory.
pub fn read_from_memory(data: &[u8]) -> IoResult<ImageData> {
    let mut decoder = png::Decoder::new(Cursor::new(data));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    if info.bit_depth != png::BitDepth::Eight {
        return Err(IoError::UnsupportedBitDepth(format!(
            "{:?} {:?}",
            info.color_type, info.bit_depth
        )));
    }
    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        other => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "{:?} {:?}",
                other, info.bit_depth
            )));
        }
    };

    // Rows come back packed at 8 bits, so the frame is exactly w*h*c bytes.
    buf.truncate(info.buffer_size());
    ImageData::new(info.width, info.height, channels, buf)
}

/// Writes an image to a PNG file.
pub fn write<P: AsRef<Path>>(path: P, image: RawImage<'_>) -> IoResult<()> {
    write_with(path, image, PngCompression::default())
}

/// Writes an image to a PNG file with the given compression effort.
pub fn write_with<P: AsRef<Path>>(
    path: P,
    image: RawImage<'_>,
    compression: PngCompression,
) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    encode(&mut writer, image, compression)?;
    writer.flush()?;
    Ok(())
}

/// Encodes an image to PNG bytes.
pub fn write_to_memory(image: RawImage<'_>, compression: PngCompression) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    encode(&mut buffer, image, compression)?;
    Ok(buffer)
}

fn encode<W: Write>(writer: W, image: RawImage<'_>, compression: PngCompression) -> IoResult<()> {
    let color_type = match image.channels {
        1 => png::ColorType::Grayscale,
        2 => png::ColorType::GrayscaleAlpha,
        3 => png::ColorType::Rgb,
        4 => png::ColorType::Rgba,
        n => return Err(IoError::EncodeError(format!("unsupported channel count: {}", n))),
    };

    let mut encoder = png::Encoder::new(writer, image.width, image.height);
    encoder.set_color(color_type);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(compression.to_png());
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(image.data)
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    Ok(())
}
