//! Resampling service for 8-bit interleaved images.
//!
//! [`Resampler`] is the contract the image buffer calls; [`SrgbResampler`]
//! is the default implementation. It treats color channels as sRGB
//! encoded, filters in linear light, and premultiplies by alpha for RGBA
//! so transparent pixels do not bleed color into their neighbours.

use crate::resize::{Filter, resize_f32};
use crate::srgb;
use crate::{OpsError, OpsResult};
use imgbuf_core::Pixel;
use tracing::trace;

/// Dimensions of a row-major pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// Bytes from the start of one row to the start of the next.
    pub stride: usize,
}

impl Extent {
    /// Creates an extent with an explicit row stride.
    pub fn new(width: usize, height: usize, stride: usize) -> Self {
        Self { width, height, stride }
    }

    /// Creates an extent whose rows are packed (`stride = width * channels`).
    pub fn packed(width: usize, height: usize, channels: usize) -> Self {
        Self::new(width, height, width * channels)
    }

    /// Bytes needed to hold the grid: the last row is not padded.
    pub fn byte_len(&self, channels: usize) -> usize {
        match self.height {
            0 => 0,
            h => (h - 1) * self.stride + self.width * channels,
        }
    }

    fn validate(&self, what: &str, channels: usize) -> OpsResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(OpsError::InvalidDimensions(format!(
                "{what} size {}x{} must be > 0",
                self.width, self.height
            )));
        }
        if self.stride < self.width * channels {
            return Err(OpsError::InvalidParameter(format!(
                "{what} stride {} shorter than a row of {} bytes",
                self.stride,
                self.width * channels
            )));
        }
        Ok(())
    }
}

/// Channel interpretation handed to the resampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    /// Single sRGB channel.
    One,
    /// Two sRGB channels, no alpha treatment.
    Two,
    /// sRGB red, green, blue.
    Rgb,
    /// sRGB red, green, blue plus linear alpha.
    Rgba,
}

impl ChannelLayout {
    /// Layout for a runtime channel count.
    pub fn from_channels(channels: usize) -> OpsResult<Self> {
        match channels {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgba),
            n => Err(OpsError::Unsupported(format!("no layout for {n} channels"))),
        }
    }

    /// Layout for `Pixel<N>`.
    pub const fn for_pixel<const N: usize>() -> Self {
        match Pixel::<N>::CHANNELS {
            1 => Self::One,
            2 => Self::Two,
            3 => Self::Rgb,
            _ => Self::Rgba,
        }
    }

    /// Channels per pixel.
    pub const fn channels(&self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Index of the linear alpha channel, if any.
    pub const fn alpha_index(&self) -> Option<usize> {
        match self {
            Self::Rgba => Some(3),
            _ => None,
        }
    }
}

/// Resizes 8-bit interleaved images.
pub trait Resampler {
    /// Resamples `src` (laid out per `src_extent`) to `dst_extent`.
    ///
    /// The returned buffer holds `dst_extent.height` rows written at
    /// `dst_extent.stride`; the last row is not padded.
    fn resize(
        &self,
        src: &[u8],
        src_extent: Extent,
        dst_extent: Extent,
        layout: ChannelLayout,
    ) -> OpsResult<Vec<u8>>;
}

/// sRGB-aware separable resampler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SrgbResampler {
    filter: Filter,
}

impl SrgbResampler {
    /// Creates a resampler with the default Mitchell filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Returns the filter in use.
    pub fn filter(&self) -> Filter {
        self.filter
    }
}

impl Resampler for SrgbResampler {
    fn resize(
        &self,
        src: &[u8],
        src_extent: Extent,
        dst_extent: Extent,
        layout: ChannelLayout,
    ) -> OpsResult<Vec<u8>> {
        let channels = layout.channels();
        src_extent.validate("source", channels)?;
        dst_extent.validate("destination", channels)?;
        let needed = src_extent.byte_len(channels);
        if src.len() < needed {
            return Err(OpsError::SizeMismatch(format!(
                "source extent needs {} bytes, got {}",
                needed,
                src.len()
            )));
        }

        trace!(
            src_width = src_extent.width,
            src_height = src_extent.height,
            dst_width = dst_extent.width,
            dst_height = dst_extent.height,
            ?layout,
            filter = ?self.filter,
            "resize"
        );

        let alpha = layout.alpha_index();
        let row_bytes = src_extent.width * channels;
        let mut linear = Vec::with_capacity(src_extent.width * src_extent.height * channels);
        for y in 0..src_extent.height {
            let row = &src[y * src_extent.stride..][..row_bytes];
            for px in row.chunks_exact(channels) {
                decode_pixel(px, alpha, &mut linear);
            }
        }

        let resized = resize_f32(
            &linear,
            src_extent.width,
            src_extent.height,
            channels,
            dst_extent.width,
            dst_extent.height,
            self.filter,
        )?;

        let mut out = vec![0u8; dst_extent.byte_len(channels)];
        let dst_row_bytes = dst_extent.width * channels;
        for (y, samples) in resized.chunks_exact(dst_row_bytes).enumerate() {
            let row = &mut out[y * dst_extent.stride..][..dst_row_bytes];
            for (px, value) in row
                .chunks_exact_mut(channels)
                .zip(samples.chunks_exact(channels))
            {
                encode_pixel(value, alpha, px);
            }
        }

        Ok(out)
    }
}

/// Appends the linear (and premultiplied, with alpha) value of one pixel.
#[inline]
fn decode_pixel(px: &[u8], alpha: Option<usize>, out: &mut Vec<f32>) {
    match alpha {
        Some(a) => {
            let coverage = px[a] as f32 / 255.0;
            out.extend(px.iter().enumerate().map(|(c, &v)| {
                if c == a {
                    coverage
                } else {
                    srgb::decode_u8(v) * coverage
                }
            }));
        }
        None => out.extend(px.iter().map(|&v| srgb::decode_u8(v))),
    }
}

/// Un-premultiplies and re-encodes one filtered pixel.
#[inline]
fn encode_pixel(value: &[f32], alpha: Option<usize>, px: &mut [u8]) {
    match alpha {
        Some(a) => {
            let coverage = value[a].clamp(0.0, 1.0);
            for (c, (out, &v)) in px.iter_mut().zip(value).enumerate() {
                *out = if c == a {
                    srgb::quantize(coverage)
                } else if coverage > 0.0 {
                    srgb::encode_u8(v / coverage)
                } else {
                    0
                };
            }
        }
        None => {
            for (out, &v) in px.iter_mut().zip(value) {
                *out = srgb::encode_u8(v);
            }
        }
    }
}
