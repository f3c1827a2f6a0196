//! JPEG format support.
//!
//! JPEG is 8-bit only and has no alpha. Decoding accepts grayscale (8 and
//! 16 bit), RGB and CMYK sources; CMYK is converted to RGB. Encoding writes
//! luma for one and two channel images and RGB for three and four channel
//! images, dropping alpha.
//!
//! ```rust,ignore
//! use imgbuf_io::jpeg::{JpegWriter, JpegWriterOptions};
//!
//! let writer = JpegWriter::with_options(JpegWriterOptions { quality: 95 });
//! writer.write("highq.jpg", image.as_raw())?;
//! ```

use crate::{ImageData, IoError, IoResult, RawImage};
use std::io::{BufReader, Cursor};
use std::path::Path;
use tracing::trace;

/// JPEG writer options.
#[derive(Debug, Clone)]
pub struct JpegWriterOptions {
    /// Quality level (1-100, higher = better quality, larger file).
    pub quality: u8,
}

impl Default for JpegWriterOptions {
    fn default() -> Self {
        Self { quality: 90 }
    }
}

/// Reads a JPEG file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let data = std::fs::read(path.as_ref())?;
    read_from_memory(&data)
}

/// Decodes a JPEG held in memory.
pub fn read_from_memory(data: &[u8]) -> IoResult<ImageData> {
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(Cursor::new(data)));
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    let width = info.width as u32;
    let height = info.height as u32;

    let (native_channels, channels, data) = match info.pixel_format {
        jpeg_decoder::PixelFormat::L8 => (1, 1, pixels),
        jpeg_decoder::PixelFormat::L16 => {
            // Keep the high byte of each big-endian sample.
            let gray: Vec<u8> = pixels.chunks_exact(2).map(|l16| l16[0]).collect();
            (1, 1, gray)
        }
        jpeg_decoder::PixelFormat::RGB24 => (3, 3, pixels),
        jpeg_decoder::PixelFormat::CMYK32 => {
            let rgb: Vec<u8> = pixels
                .chunks_exact(4)
                .flat_map(|cmyk| {
                    let k = 255 - cmyk[3] as u32;
                    [
                        ((255 - cmyk[0] as u32) * k / 255) as u8,
                        ((255 - cmyk[1] as u32) * k / 255) as u8,
                        ((255 - cmyk[2] as u32) * k / 255) as u8,
                    ]
                })
                .collect();
            (4, 3, rgb)
        }
    };
    trace!(width, height, native_channels, "decoded JPEG");

    let mut image = ImageData::new(width, height, channels, data)?;
    image.native_channels = native_channels;
    Ok(image)
}

/// JPEG encoder with configurable quality.
#[derive(Debug, Clone, Default)]
pub struct JpegWriter {
    options: JpegWriterOptions,
}

impl JpegWriter {
    /// Creates a writer with default options (quality 90).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer with the given options.
    pub fn with_options(options: JpegWriterOptions) -> Self {
        Self { options }
    }

    /// Writes a JPEG file.
    pub fn write<P: AsRef<Path>>(&self, path: P, image: RawImage<'_>) -> IoResult<()> {
        let data = self.write_to_memory(image)?;
        std::fs::write(path.as_ref(), data)?;
        Ok(())
    }

    /// Encodes to JPEG bytes.
    pub fn write_to_memory(&self, image: RawImage<'_>) -> IoResult<Vec<u8>> {
        use jpeg_encoder::{ColorType, Encoder};

        let (width, height) = match (u16::try_from(image.width), u16::try_from(image.height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(IoError::EncodeError(format!(
                    "{}x{} exceeds the JPEG size limit of 65535",
                    image.width, image.height
                )));
            }
        };

        let gray;
        let (color_type, pixel_data) = match image.channels {
            1 => (ColorType::Luma, image.data),
            2 => {
                gray = image.data.chunks_exact(2).map(|ya| ya[0]).collect::<Vec<u8>>();
                (ColorType::Luma, gray.as_slice())
            }
            3 => (ColorType::Rgb, image.data),
            // The encoder ignores the alpha byte.
            4 => (ColorType::Rgba, image.data),
            n => return Err(IoError::EncodeError(format!("unsupported channel count: {}", n))),
        };

        let mut buffer = Vec::new();
        let encoder = Encoder::new(&mut buffer, self.options.quality.clamp(1, 100));
        encoder
            .encode(pixel_data, width, height, color_type)
            .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;

        Ok(buffer)
    }
}

/// Writes a JPEG file with default options (quality 90).
pub fn write<P: AsRef<Path>>(path: P, image: RawImage<'_>) -> IoResult<()> {
    JpegWriter::new().write(path, image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_rgb() {
        let data = vec![128u8; 16 * 8 * 3];
        let image = RawImage::new(16, 8, 3, &data).unwrap();

        let bytes = JpegWriter::new().write_to_memory(image).unwrap();
        let loaded = read_from_memory(&bytes).unwrap();

        assert_eq!((loaded.width, loaded.height, loaded.channels), (16, 8, 3));
        // Flat colors survive JPEG within a small tolerance.
        assert!(loaded.data.iter().all(|&v| (v as i32 - 128).abs() <= 2));
    }

    #[test]
    fn test_gray_alpha_written_as_luma() {
        let data: Vec<u8> = (0..8 * 8).flat_map(|_| [200u8, 10]).collect();
        let image = RawImage::new(8, 8, 2, &data).unwrap();

        let bytes = JpegWriter::new().write_to_memory(image).unwrap();
        let loaded = read_from_memory(&bytes).unwrap();
        assert_eq!(loaded.channels, 1);
        assert_eq!(loaded.native_channels, 1);
    }

    #[test]
    fn test_quality_affects_size() {
        let data: Vec<u8> = (0..64 * 64 * 3).map(|i| (i * 7 % 251) as u8).collect();
        let image = RawImage::new(64, 64, 3, &data).unwrap();

        let low = JpegWriter::with_options(JpegWriterOptions { quality: 10 })
            .write_to_memory(image)
            .unwrap();
        let high = JpegWriter::with_options(JpegWriterOptions { quality: 100 })
            .write_to_memory(image)
            .unwrap();
        assert!(low.len() < high.len());
    }
}
