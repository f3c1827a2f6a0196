//! Channel count conversion for interleaved 8-bit samples.
//!
//! Decoders produce whatever the file stores; callers ask for a fixed
//! channel count. The rules:
//!
//! | from \ to | 1 | 2 | 3 | 4 |
//! |-----------|---|---|---|---|
//! | 1 (Y)     | - | Y,255 | Y,Y,Y | Y,Y,Y,255 |
//! | 2 (YA)    | Y | - | Y,Y,Y | Y,Y,Y,A |
//! | 3 (RGB)   | luma | luma,255 | - | R,G,B,255 |
//! | 4 (RGBA)  | luma | luma,A | R,G,B | - |
//!
//! Luma uses the integer weights `(77 R + 150 G + 29 B) >> 8`.

use crate::{IoError, IoResult};
use imgbuf_core::MAX_CHANNELS;

/// Integer Rec.601 luma of an 8-bit RGB triple.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 77 + g as u32 * 150 + b as u32 * 29) >> 8) as u8
}

/// Converts interleaved samples from `from` to `to` channels per pixel.
///
/// Returns `data` unchanged (no copy) when the counts already match.
///
/// # Errors
///
/// - [`IoError::UnsupportedChannels`] if either count is outside 1..=4
/// - [`IoError::DimensionMismatch`] if `data` is not a whole number of pixels
pub fn convert_channels(data: Vec<u8>, from: u32, to: u32) -> IoResult<Vec<u8>> {
    check_channels(from)?;
    check_channels(to)?;
    if data.len() % from as usize != 0 {
        return Err(IoError::DimensionMismatch {
            expected: format!("a multiple of {from} samples"),
            actual: data.len().to_string(),
        });
    }
    if from == to {
        return Ok(data);
    }

    let pixels = data.len() / from as usize;
    let mut out = Vec::with_capacity(pixels * to as usize);
    for px in data.chunks_exact(from as usize) {
        match (from, to) {
            (1, 2) => out.extend_from_slice(&[px[0], 255]),
            (1, 3) => out.extend_from_slice(&[px[0], px[0], px[0]]),
            (1, 4) => out.extend_from_slice(&[px[0], px[0], px[0], 255]),
            (2, 1) => out.push(px[0]),
            (2, 3) => out.extend_from_slice(&[px[0], px[0], px[0]]),
            (2, 4) => out.extend_from_slice(&[px[0], px[0], px[0], px[1]]),
            (3, 1) => out.push(luma(px[0], px[1], px[2])),
            (3, 2) => out.extend_from_slice(&[luma(px[0], px[1], px[2]), 255]),
            (3, 4) => out.extend_from_slice(&[px[0], px[1], px[2], 255]),
            (4, 1) => out.push(luma(px[0], px[1], px[2])),
            (4, 2) => out.extend_from_slice(&[luma(px[0], px[1], px[2]), px[3]]),
            (4, 3) => out.extend_from_slice(&[px[0], px[1], px[2]]),
            _ => unreachable!("channel counts validated above"),
        }
    }
    Ok(out)
}

/// Rejects channel counts outside 1..=4.
pub(crate) fn check_channels(channels: u32) -> IoResult<()> {
    if channels == 0 || channels as usize > MAX_CHANNELS {
        return Err(IoError::UnsupportedChannels(channels));
    }
    Ok(())
}
