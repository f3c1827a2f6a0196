//! sRGB transfer function and 8-bit lookup.
//!
//! The sRGB standard uses a piecewise function combining a linear segment
//! near black with a power curve (approximately gamma 2.2) for the rest.
//!
//! # Range
//!
//! - Input/Output: [0, 1]
//!
//! # Reference
//!
//! IEC 61966-2-1:1999

use lazy_static::lazy_static;

lazy_static! {
    /// Linear value of every 8-bit sRGB code.
    static ref TO_LINEAR: [f32; 256] = {
        let mut table = [0.0f32; 256];
        for (code, slot) in table.iter_mut().enumerate() {
            *slot = eotf(code as f32 / 255.0);
        }
        table
    };
}

/// sRGB EOTF: Decodes sRGB encoded values to linear light.
///
/// # Formula
///
/// ```text
/// if V <= 0.04045:
///     L = V / 12.92
/// else:
///     L = ((V + 0.055) / 1.055)^2.4
/// ```
///
/// # Example
///
/// ```rust
/// use imgbuf_ops::srgb::eotf;
///
/// let linear = eotf(0.5);
/// assert!((linear - 0.214).abs() < 0.01);
/// ```
#[inline]
pub fn eotf(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB OETF: Encodes linear light to sRGB.
///
/// # Formula
///
/// ```text
/// if L <= 0.0031308:
///     V = L * 12.92
/// else:
///     V = 1.055 * L^(1/2.4) - 0.055
/// ```
#[inline]
pub fn oetf(l: f32) -> f32 {
    if l <= 0.0031308 {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}

/// Decodes an 8-bit sRGB code to linear light through the lookup table.
#[inline]
pub fn decode_u8(code: u8) -> f32 {
    TO_LINEAR[code as usize]
}

/// Encodes linear light to the nearest 8-bit sRGB code.
///
/// Values outside [0, 1] are clamped.
#[inline]
pub fn encode_u8(linear: f32) -> u8 {
    quantize(oetf(linear.clamp(0.0, 1.0)))
}

/// Rounds a [0, 1] value to 8 bits, clamping out-of-range input.
#[inline]
pub fn quantize(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_roundtrip() {
        for i in 0..=100 {
            let v = i as f32 / 100.0;
            assert_abs_diff_eq!(oetf(eotf(v)), v, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(eotf(0.0), 0.0);
        assert_abs_diff_eq!(eotf(1.0), 1.0, epsilon = 1e-6);
        assert_eq!(oetf(0.0), 0.0);
        assert_abs_diff_eq!(oetf(1.0), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_every_code_survives_the_table() {
        for code in 0..=255u8 {
            assert_eq!(encode_u8(decode_u8(code)), code);
        }
    }

    #[test]
    fn test_encode_clamps() {
        assert_eq!(encode_u8(-0.5), 0);
        assert_eq!(encode_u8(3.0), 255);
        assert_eq!(quantize(0.5), 128);
    }
}
