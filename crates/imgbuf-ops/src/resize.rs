//! Separable resampling of interleaved f32 samples.
//!
//! Resizes in two passes, horizontal then vertical. Filter weights are
//! computed once per output column and once per output row and reused
//! across the other axis.
//!
//! # Filters
//!
//! - [`Filter::Nearest`] - Fastest, no interpolation (blocky)
//! - [`Filter::Bilinear`] - Linear interpolation (smooth but blurry)
//! - [`Filter::Bicubic`] - Mitchell-Netravali cubic, the default
//! - [`Filter::CatmullRom`] - Interpolating cubic, sharper than Mitchell
//! - [`Filter::Lanczos3`] - Sinc-based (best for downscaling)
//!
//! # Example
//!
//! ```rust
//! use imgbuf_ops::resize::{resize_f32, Filter};
//!
//! let src: Vec<f32> = vec![0.0; 64 * 64 * 4]; // 64x64 RGBA
//! let dst = resize_f32(&src, 64, 64, 4, 128, 128, Filter::Lanczos3).unwrap();
//! assert_eq!(dst.len(), 128 * 128 * 4);
//! ```

use crate::{OpsError, OpsResult};
use imgbuf_core::MAX_CHANNELS;

/// Resampling filter for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    /// Nearest-neighbor (fastest, no interpolation).
    Nearest,
    /// Bilinear interpolation (smooth, fast).
    Bilinear,
    /// Mitchell-Netravali cubic (B = C = 1/3).
    #[default]
    Bicubic,
    /// Catmull-Rom cubic (B = 0, C = 1/2).
    CatmullRom,
    /// Lanczos-3 (high quality, best for downscaling).
    Lanczos3,
}

impl Filter {
    /// Returns the support radius for this filter.
    #[inline]
    pub fn support(&self) -> f32 {
        match self {
            Filter::Nearest => 0.5,
            Filter::Bilinear => 1.0,
            Filter::Bicubic | Filter::CatmullRom => 2.0,
            Filter::Lanczos3 => 3.0,
        }
    }

    /// Evaluates the filter kernel at position x.
    #[inline]
    pub fn weight(&self, x: f32) -> f32 {
        match self {
            Filter::Nearest => nearest_weight(x),
            Filter::Bilinear => bilinear_weight(x),
            Filter::Bicubic => cubic_weight(x, 1.0 / 3.0, 1.0 / 3.0),
            Filter::CatmullRom => cubic_weight(x, 0.0, 0.5),
            Filter::Lanczos3 => lanczos_weight(x, 3.0),
        }
    }
}

#[inline]
fn nearest_weight(x: f32) -> f32 {
    if (-0.5..0.5).contains(&x) { 1.0 } else { 0.0 }
}

#[inline]
fn bilinear_weight(x: f32) -> f32 {
    let ax = x.abs();
    if ax < 1.0 { 1.0 - ax } else { 0.0 }
}

/// Mitchell-Netravali family of cubics.
#[inline]
fn cubic_weight(x: f32, b: f32, c: f32) -> f32 {
    let ax = x.abs();
    if ax < 1.0 {
        ((12.0 - 9.0 * b - 6.0 * c) * ax * ax * ax
            + (-18.0 + 12.0 * b + 6.0 * c) * ax * ax
            + (6.0 - 2.0 * b))
            / 6.0
    } else if ax < 2.0 {
        ((-b - 6.0 * c) * ax * ax * ax
            + (6.0 * b + 30.0 * c) * ax * ax
            + (-12.0 * b - 48.0 * c) * ax
            + (8.0 * b + 24.0 * c))
            / 6.0
    } else {
        0.0
    }
}

#[inline]
fn lanczos_weight(x: f32, a: f32) -> f32 {
    let ax = x.abs();
    if ax < 1e-8 {
        1.0
    } else if ax < a {
        let pi_x = std::f32::consts::PI * ax;
        let pi_x_a = pi_x / a;
        (pi_x.sin() / pi_x) * (pi_x_a.sin() / pi_x_a)
    } else {
        0.0
    }
}

/// Normalized taps contributing to one output sample.
#[derive(Debug, Clone)]
struct Contribution {
    first: usize,
    weights: Vec<f32>,
}

/// Computes the taps for every output position along one axis.
fn contributions(src_len: usize, dst_len: usize, filter: Filter) -> Vec<Contribution> {
    let scale = src_len as f32 / dst_len as f32;
    let widen = scale.max(1.0);
    let support = filter.support() * widen;

    (0..dst_len)
        .map(|i| {
            let center = (i as f32 + 0.5) * scale - 0.5;
            let first = ((center - support).floor().max(0.0)) as usize;
            let last = ((center + support).ceil().max(0.0) as usize).min(src_len - 1);

            let mut weights: Vec<f32> = (first..=last)
                .map(|s| filter.weight((s as f32 - center) / widen))
                .collect();
            let total: f32 = weights.iter().sum();
            if total.abs() > f32::EPSILON {
                weights.iter_mut().for_each(|w| *w /= total);
            } else {
                // No tap in range; fall back to the nearest source sample.
                let nearest = (center.round().max(0.0) as usize).min(src_len - 1);
                weights.iter_mut().for_each(|w| *w = 0.0);
                weights[nearest.clamp(first, last) - first] = 1.0;
            }
            Contribution { first, weights }
        })
        .collect()
}

/// Resizes packed f32 image data.
///
/// `src` holds `src_w * src_h * channels` interleaved samples with no row
/// padding; the result is packed the same way at the new size.
///
/// # Errors
///
/// - [`OpsError::InvalidDimensions`] if any dimension is zero
/// - [`OpsError::SizeMismatch`] if `src` does not match its dimensions
/// - [`OpsError::Unsupported`] for channel counts outside 1..=4
pub fn resize_f32(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_w: usize,
    dst_h: usize,
    filter: Filter,
) -> OpsResult<Vec<f32>> {
    if channels == 0 || channels > MAX_CHANNELS {
        return Err(OpsError::Unsupported(format!(
            "{channels} channels (1 to {MAX_CHANNELS} supported)"
        )));
    }
    if src_w == 0 || src_h == 0 {
        return Err(OpsError::InvalidDimensions(format!(
            "source size {src_w}x{src_h} must be > 0"
        )));
    }
    if dst_w == 0 || dst_h == 0 {
        return Err(OpsError::InvalidDimensions(format!(
            "destination size {dst_w}x{dst_h} must be > 0"
        )));
    }
    let expected = src_w * src_h * channels;
    if src.len() != expected {
        return Err(OpsError::SizeMismatch(format!(
            "expected {} samples, got {}",
            expected,
            src.len()
        )));
    }

    let temp = resize_horizontal(src, src_w, src_h, channels, dst_w, filter);
    Ok(resize_vertical(&temp, dst_w, src_h, channels, dst_h, filter))
}

fn resize_horizontal(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_w: usize,
    filter: Filter,
) -> Vec<f32> {
    let taps = contributions(src_w, dst_w, filter);
    let mut dst = vec![0.0f32; dst_w * src_h * channels];

    for (src_row, dst_row) in src
        .chunks_exact(src_w * channels)
        .zip(dst.chunks_exact_mut(dst_w * channels))
    {
        for (tap, out) in taps.iter().zip(dst_row.chunks_exact_mut(channels)) {
            let mut sum = [0.0f32; MAX_CHANNELS];
            for (k, &w) in tap.weights.iter().enumerate() {
                let px = &src_row[(tap.first + k) * channels..][..channels];
                for c in 0..channels {
                    sum[c] += px[c] * w;
                }
            }
            out.copy_from_slice(&sum[..channels]);
        }
    }

    dst
}

fn resize_vertical(
    src: &[f32],
    width: usize,
    src_h: usize,
    channels: usize,
    dst_h: usize,
    filter: Filter,
) -> Vec<f32> {
    let taps = contributions(src_h, dst_h, filter);
    let row_len = width * channels;
    let mut dst = vec![0.0f32; row_len * dst_h];

    for (tap, dst_row) in taps.iter().zip(dst.chunks_exact_mut(row_len)) {
        for (k, &w) in tap.weights.iter().enumerate() {
            let src_row = &src[(tap.first + k) * row_len..][..row_len];
            for (d, &s) in dst_row.iter_mut().zip(src_row) {
                *d += s * w;
            }
        }
    }

    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_filter_weights() {
        assert_abs_diff_eq!(Filter::Nearest.weight(0.0), 1.0);
        assert_abs_diff_eq!(Filter::Nearest.weight(0.6), 0.0);
        assert_abs_diff_eq!(Filter::Bilinear.weight(0.5), 0.5);
        assert_abs_diff_eq!(Filter::Lanczos3.weight(0.0), 1.0);

        // Catmull-Rom interpolates: 1 at 0, 0 at the integers.
        assert_abs_diff_eq!(Filter::CatmullRom.weight(0.0), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(Filter::CatmullRom.weight(1.0), 0.0, epsilon = 1e-6);
        // Mitchell does not.
        assert!(Filter::Bicubic.weight(0.0) < 1.0);
    }

    #[test]
    fn test_identity_nearest_is_exact() {
        let src: Vec<f32> = (0..5 * 3 * 2).map(|i| i as f32).collect();
        let dst = resize_f32(&src, 5, 3, 2, 5, 3, Filter::Nearest).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn test_constant_image_stays_constant() {
        let src = vec![0.5f32; 4 * 4 * 4];
        for filter in [Filter::Bilinear, Filter::Bicubic, Filter::CatmullRom, Filter::Lanczos3] {
            let up = resize_f32(&src, 4, 4, 4, 9, 7, filter).unwrap();
            assert_eq!(up.len(), 9 * 7 * 4);
            for v in up {
                assert_abs_diff_eq!(v, 0.5, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_downscale_averages() {
        // 2x1 gray, black and white, box-like reduction to 1x1.
        let src = vec![0.0f32, 1.0];
        let dst = resize_f32(&src, 2, 1, 1, 1, 1, Filter::Bilinear).unwrap();
        assert_abs_diff_eq!(dst[0], 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            resize_f32(&[0.0; 4], 2, 2, 1, 0, 2, Filter::Bicubic),
            Err(OpsError::InvalidDimensions(_))
        ));
        assert!(matches!(
            resize_f32(&[0.0; 3], 2, 2, 1, 1, 1, Filter::Bicubic),
            Err(OpsError::SizeMismatch(_))
        ));
        assert!(matches!(
            resize_f32(&[0.0; 5], 1, 1, 5, 1, 1, Filter::Bicubic),
            Err(OpsError::Unsupported(_))
        ));
    }
}
