//! Windows bitmap (BMP) support.
//!
//! Manual implementation of the uncompressed subset:
//!
//! - Read: 8-bit paletted, 24-bit BGR, 32-bit BGRA (`BI_RGB`, or
//!   `BI_BITFIELDS` with the standard masks), bottom-up or top-down rows.
//! - Write: 24-bit BGR for 1-3 channel images, 32-bit BGRA for 4 channels,
//!   bottom-up with rows padded to 4 bytes.
//!
//! All header fields are little-endian.

use crate::{ImageData, IoError, IoResult, RawImage};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, Seek, SeekFrom, Write};
use std::path::Path;

const FILE_HEADER_SIZE: u32 = 14;
const INFO_HEADER_SIZE: u32 = 40;
const BI_RGB: u32 = 0;
const BI_BITFIELDS: u32 = 3;

/// Parsed BITMAPFILEHEADER + BITMAPINFOHEADER fields we care about.
#[derive(Debug, Clone, Copy)]
struct Header {
    data_offset: u32,
    dib_size: u32,
    width: u32,
    height: u32,
    top_down: bool,
    bits_per_pixel: u16,
    compression: u32,
    colors_used: u32,
}

/// Bytes per stored row, padded to a multiple of four.
#[inline]
fn row_stride(width: u32, bits_per_pixel: u16) -> usize {
    (bits_per_pixel as usize * width as usize).div_ceil(32) * 4
}

fn read_header(cursor: &mut Cursor<&[u8]>) -> IoResult<Header> {
    let mut magic = [0u8; 2];
    std::io::Read::read_exact(cursor, &mut magic)?;
    if &magic != b"BM" {
        return Err(IoError::InvalidFile("missing BM signature".into()));
    }
    let _file_size = cursor.read_u32::<LittleEndian>()?;
    let _reserved = cursor.read_u32::<LittleEndian>()?;
    let data_offset = cursor.read_u32::<LittleEndian>()?;

    let dib_size = cursor.read_u32::<LittleEndian>()?;
    if dib_size < INFO_HEADER_SIZE {
        return Err(IoError::DecodeError(format!(
            "unsupported BMP header size {dib_size}"
        )));
    }
    let width = cursor.read_i32::<LittleEndian>()?;
    let height = cursor.read_i32::<LittleEndian>()?;
    let _planes = cursor.read_u16::<LittleEndian>()?;
    let bits_per_pixel = cursor.read_u16::<LittleEndian>()?;
    let compression = cursor.read_u32::<LittleEndian>()?;
    let _image_size = cursor.read_u32::<LittleEndian>()?;
    let _x_ppm = cursor.read_i32::<LittleEndian>()?;
    let _y_ppm = cursor.read_i32::<LittleEndian>()?;
    let colors_used = cursor.read_u32::<LittleEndian>()?;
    let _colors_important = cursor.read_u32::<LittleEndian>()?;

    if width <= 0 || height == 0 || height == i32::MIN {
        return Err(IoError::InvalidFile(format!(
            "invalid BMP dimensions {width}x{height}"
        )));
    }

    Ok(Header {
        data_offset,
        dib_size,
        width: width as u32,
        height: height.unsigned_abs(),
        top_down: height < 0,
        bits_per_pixel,
        compression,
        colors_used,
    })
}

/// Reads a BMP file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let data = std::fs::read(path.as_ref())?;
    read_from_memory(&data)
}

/// Decodes a BMP held in memory.
pub fn read_from_memory(data: &[u8]) -> IoResult<ImageData> {
    let mut cursor = Cursor::new(data);
    let header = read_header(&mut cursor)?;

    let (channels, native_channels) = match (header.bits_per_pixel, header.compression) {
        (8, BI_RGB) => (3, 3),
        (24, BI_RGB) => (3, 3),
        (32, BI_RGB) => (4, 4),
        (32, BI_BITFIELDS) => {
            check_standard_masks(&mut cursor)?;
            (4, 4)
        }
        (bpp, compression) => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "{bpp}-bit BMP with compression {compression}"
            )));
        }
    };

    let palette = if header.bits_per_pixel == 8 {
        read_palette(&mut cursor, &header)?
    } else {
        Vec::new()
    };

    let width = header.width as usize;
    let height = header.height as usize;
    let stride = row_stride(header.width, header.bits_per_pixel);
    let start = header.data_offset as usize;
    let needed = stride
        .checked_mul(height)
        .and_then(|n| n.checked_add(start))
        .ok_or_else(|| IoError::InvalidFile("BMP dimensions overflow".into()))?;
    if data.len() < needed {
        return Err(IoError::InvalidFile(format!(
            "truncated BMP: need {needed} bytes, have {}",
            data.len()
        )));
    }

    let mut out = Vec::with_capacity(width * height * channels as usize);
    for y in 0..height {
        let stored_row = if header.top_down { y } else { height - 1 - y };
        let row = &data[start + stored_row * stride..][..stride];
        match header.bits_per_pixel {
            8 => {
                for &index in &row[..width] {
                    let bgr = palette.get(index as usize).copied().unwrap_or([0, 0, 0]);
                    out.extend_from_slice(&[bgr[2], bgr[1], bgr[0]]);
                }
            }
            24 => {
                for bgr in row[..width * 3].chunks_exact(3) {
                    out.extend_from_slice(&[bgr[2], bgr[1], bgr[0]]);
                }
            }
            _ => {
                for bgra in row[..width * 4].chunks_exact(4) {
                    out.extend_from_slice(&[bgra[2], bgra[1], bgra[0], bgra[3]]);
                }
            }
        }
    }

    // Many writers leave the fourth byte zero; treat that as opaque.
    if channels == 4 && out.chunks_exact(4).all(|px| px[3] == 0) {
        out.chunks_exact_mut(4).for_each(|px| px[3] = 255);
    }

    let mut image = ImageData::new(header.width, header.height, channels, out)?;
    image.native_channels = native_channels;
    Ok(image)
}

fn check_standard_masks(cursor: &mut Cursor<&[u8]>) -> IoResult<()> {
    cursor.seek(SeekFrom::Start((FILE_HEADER_SIZE + INFO_HEADER_SIZE) as u64))?;
    let red = cursor.read_u32::<LittleEndian>()?;
    let green = cursor.read_u32::<LittleEndian>()?;
    let blue = cursor.read_u32::<LittleEndian>()?;
    if (red, green, blue) != (0x00FF_0000, 0x0000_FF00, 0x0000_00FF) {
        return Err(IoError::UnsupportedBitDepth(format!(
            "BMP channel masks {red:#010x}/{green:#010x}/{blue:#010x}"
        )));
    }
    Ok(())
}

fn read_palette(cursor: &mut Cursor<&[u8]>, header: &Header) -> IoResult<Vec<[u8; 3]>> {
    let count = match header.colors_used {
        0 => 256,
        n => n.min(256),
    };
    cursor.seek(SeekFrom::Start((FILE_HEADER_SIZE + header.dib_size) as u64))?;
    let mut palette = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let mut entry = [0u8; 4];
        std::io::Read::read_exact(cursor, &mut entry)?;
        palette.push([entry[0], entry[1], entry[2]]);
    }
    Ok(palette)
}

/// Writes a BMP file.
pub fn write<P: AsRef<Path>>(path: P, image: RawImage<'_>) -> IoResult<()> {
    let data = write_to_memory(image)?;
    std::fs::write(path.as_ref(), data)?;
    Ok(())
}

/// Encodes to BMP bytes.
pub fn write_to_memory(image: RawImage<'_>) -> IoResult<Vec<u8>> {
    let bits_per_pixel: u16 = match image.channels {
        1..=3 => 24,
        4 => 32,
        n => return Err(IoError::EncodeError(format!("unsupported channel count: {}", n))),
    };
    if image.width == 0 || image.height == 0 {
        return Err(IoError::EncodeError(format!(
            "{}x{} image has no pixels",
            image.width, image.height
        )));
    }
    let (width, height) = match (i32::try_from(image.width), i32::try_from(image.height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(IoError::EncodeError(format!(
                "{}x{} too large for BMP",
                image.width, image.height
            )));
        }
    };

    let stride = row_stride(image.width, bits_per_pixel);
    let image_size = u32::try_from(stride * image.height as usize)
        .map_err(|_| IoError::EncodeError("BMP pixel data exceeds 4 GiB".into()))?;
    let data_offset = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
    let file_size = data_offset
        .checked_add(image_size)
        .ok_or_else(|| IoError::EncodeError("BMP file exceeds 4 GiB".into()))?;

    let mut out = Vec::with_capacity(file_size as usize);
    out.write_all(b"BM")?;
    out.write_u32::<LittleEndian>(file_size)?;
    out.write_u32::<LittleEndian>(0)?;
    out.write_u32::<LittleEndian>(data_offset)?;

    out.write_u32::<LittleEndian>(INFO_HEADER_SIZE)?;
    out.write_i32::<LittleEndian>(width)?;
    out.write_i32::<LittleEndian>(height)?;
    out.write_u16::<LittleEndian>(1)?;
    out.write_u16::<LittleEndian>(bits_per_pixel)?;
    out.write_u32::<LittleEndian>(BI_RGB)?;
    out.write_u32::<LittleEndian>(image_size)?;
    // 72 dpi
    out.write_i32::<LittleEndian>(2835)?;
    out.write_i32::<LittleEndian>(2835)?;
    out.write_u32::<LittleEndian>(0)?;
    out.write_u32::<LittleEndian>(0)?;

    let channels = image.channels as usize;
    let row_bytes = image.width as usize * channels;
    let padding = stride - image.width as usize * (bits_per_pixel as usize / 8);
    for y in (0..image.height as usize).rev() {
        let row = &image.data[y * row_bytes..][..row_bytes];
        for px in row.chunks_exact(channels) {
            match channels {
                1 | 2 => out.extend_from_slice(&[px[0], px[0], px[0]]),
                3 => out.extend_from_slice(&[px[2], px[1], px[0]]),
                _ => out.extend_from_slice(&[px[2], px[1], px[0], px[3]]),
            }
        }
        out.extend(std::iter::repeat_n(0u8, padding));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_rgb_with_padding() {
        // Width 3 * 3 bytes = 9, padded to 12 per row.
        let data: Vec<u8> = (0..3 * 2 * 3).map(|i| i as u8 * 10).collect();
        let image = RawImage::new(3, 2, 3, &data).unwrap();

        let bytes = write_to_memory(image).unwrap();
        assert_eq!(bytes.len(), 54 + 12 * 2);

        let loaded = read_from_memory(&bytes).unwrap();
        assert_eq!((loaded.width, loaded.height, loaded.channels), (3, 2, 3));
        assert_eq!(loaded.data, data);
    }

    #[test]
    fn test_roundtrip_rgba() {
        let data: Vec<u8> = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let image = RawImage::new(2, 1, 4, &data).unwrap();

        let loaded = read_from_memory(&write_to_memory(image).unwrap()).unwrap();
        assert_eq!(loaded.channels, 4);
        assert_eq!(loaded.native_channels, 4);
        assert_eq!(loaded.data, data);
    }

    #[test]
    fn test_gray_written_as_bgr() {
        let data = vec![7u8, 9];
        let image = RawImage::new(2, 1, 1, &data).unwrap();

        let loaded = read_from_memory(&write_to_memory(image).unwrap()).unwrap();
        assert_eq!(loaded.channels, 3);
        assert_eq!(loaded.data, vec![7, 7, 7, 9, 9, 9]);
    }

    #[test]
    fn test_top_down_and_palette() {
        // 2x2 top-down 8-bit paletted image.
        let mut bytes = Vec::new();
        let data_offset = 14 + 40 + 2 * 4;
        bytes.extend_from_slice(b"BM");
        bytes.write_u32::<LittleEndian>(data_offset + 8).unwrap();
        bytes.write_u32::<LittleEndian>(0).unwrap();
        bytes.write_u32::<LittleEndian>(data_offset).unwrap();
        bytes.write_u32::<LittleEndian>(40).unwrap();
        bytes.write_i32::<LittleEndian>(2).unwrap();
        bytes.write_i32::<LittleEndian>(-2).unwrap();
        bytes.write_u16::<LittleEndian>(1).unwrap();
        bytes.write_u16::<LittleEndian>(8).unwrap();
        bytes.write_u32::<LittleEndian>(BI_RGB).unwrap();
        bytes.write_u32::<LittleEndian>(8).unwrap();
        bytes.write_i32::<LittleEndian>(0).unwrap();
        bytes.write_i32::<LittleEndian>(0).unwrap();
        bytes.write_u32::<LittleEndian>(2).unwrap();
        bytes.write_u32::<LittleEndian>(0).unwrap();
        // Palette: 0 = blue, 1 = red (stored BGRx).
        bytes.extend_from_slice(&[255, 0, 0, 0, 0, 0, 255, 0]);
        // Rows padded to 4 bytes.
        bytes.extend_from_slice(&[0, 1, 0, 0, 1, 1, 0, 0]);

        let loaded = read_from_memory(&bytes).unwrap();
        assert_eq!((loaded.width, loaded.height), (2, 2));
        assert_eq!(
            loaded.data,
            vec![0, 0, 255, 255, 0, 0, 255, 0, 0, 255, 0, 0]
        );
    }

    #[test]
    fn test_truncated_file() {
        let data = vec![0u8; 4 * 4 * 3];
        let image = RawImage::new(4, 4, 3, &data).unwrap();
        let bytes = write_to_memory(image).unwrap();

        let err = read_from_memory(&bytes[..bytes.len() - 5]).unwrap_err();
        assert!(matches!(err, IoError::InvalidFile(_)));
    }

    #[test]
    fn test_rejects_empty_image() {
        for (w, h) in [(0, 0), (0, 3), (3, 0)] {
            let image = RawImage::new(w, h, 3, &[]).unwrap();
            let err = write_to_memory(image).unwrap_err();
            assert!(matches!(err, IoError::EncodeError(_)), "{w}x{h}");
        }
    }

    #[test]
    fn test_rejects_non_bmp() {
        assert!(read_from_memory(b"PK\x03\x04 not a bitmap at all......").is_err());
    }
}
