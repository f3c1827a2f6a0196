//! Fixed-arity 8-bit pixel type.
//!
//! [`Pixel<N>`] holds exactly `N` unsigned 8-bit channel samples inline. The
//! arity is a const generic restricted to `1..=4`; instantiating any other
//! arity fails to compile as soon as a pixel is constructed.
//!
//! ```
//! use imgbuf_core::Pixel;
//!
//! let mut px = Pixel::new([255, 128, 0]);
//! px[2] = 64;
//! assert_eq!(px.as_array(), &[255, 128, 64]);
//! assert_eq!(px.channels(), 3);
//! ```
//!
//! # Memory Layout
//!
//! `Pixel<N>` is `#[repr(transparent)]` over `[u8; N]`: size `N`, alignment
//! 1, no padding. A slice of `k * N` bytes is therefore exactly `k` pixels,
//! which is what lets image buffers hand out `&[Pixel<N>]` views without
//! copying.

use crate::{Error, Result};
use bytemuck::{Pod, Zeroable};
use std::ops::{Index, IndexMut};

/// Largest supported pixel arity.
pub const MAX_CHANNELS: usize = 4;

/// A pixel of `N` interleaved 8-bit channels.
///
/// Common aliases: [`Pixel1`] (gray), [`Pixel2`] (gray + alpha),
/// [`Pixel3`] (RGB), [`Pixel4`] (RGBA).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Pixel<const N: usize>([u8; N]);

/// Single-channel pixel.
pub type Pixel1 = Pixel<1>;
/// Two-channel pixel.
pub type Pixel2 = Pixel<2>;
/// Three-channel pixel.
pub type Pixel3 = Pixel<3>;
/// Four-channel pixel.
pub type Pixel4 = Pixel<4>;

// SAFETY: `Pixel<N>` is a transparent wrapper over `[u8; N]`, which is Pod.
unsafe impl<const N: usize> Zeroable for Pixel<N> {}
// SAFETY: see above; any bit pattern is a valid pixel and there is no padding.
unsafe impl<const N: usize> Pod for Pixel<N> {}

impl<const N: usize> Pixel<N> {
    /// Number of channels. Evaluating it rejects arities outside `1..=4`.
    pub const CHANNELS: usize = {
        assert!(N >= 1 && N <= MAX_CHANNELS, "pixel arity must be in 1..=4");
        N
    };

    /// Creates a pixel from exactly `N` channel values.
    #[inline]
    pub const fn new(values: [u8; N]) -> Self {
        let _ = Self::CHANNELS;
        Self(values)
    }

    /// Creates a pixel from a runtime slice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Arity`] if `values.len() != N`.
    ///
    /// ```
    /// use imgbuf_core::{Error, Pixel};
    ///
    /// assert!(Pixel::<3>::from_slice(&[1, 2, 3]).is_ok());
    /// assert_eq!(
    ///     Pixel::<3>::from_slice(&[1, 2]),
    ///     Err(Error::Arity { expected: 3, got: 2 })
    /// );
    /// ```
    pub fn from_slice(values: &[u8]) -> Result<Self> {
        let array: [u8; N] = values.try_into().map_err(|_| Error::Arity {
            expected: N,
            got: values.len(),
        })?;
        Ok(Self::new(array))
    }

    /// Returns the pixel arity `N`.
    #[inline]
    pub const fn channels(&self) -> usize {
        Self::CHANNELS
    }

    /// Returns the channel at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelOutOfBounds`] if `index >= N`.
    #[inline]
    pub fn channel(&self, index: usize) -> Result<u8> {
        self.0
            .get(index)
            .copied()
            .ok_or(Error::ChannelOutOfBounds { index, channels: N })
    }

    /// Sets the channel at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelOutOfBounds`] if `index >= N`.
    #[inline]
    pub fn set_channel(&mut self, index: usize, value: u8) -> Result<()> {
        let slot = self
            .0
            .get_mut(index)
            .ok_or(Error::ChannelOutOfBounds { index, channels: N })?;
        *slot = value;
        Ok(())
    }

    /// Returns the channel values as an array.
    #[inline]
    pub const fn as_array(&self) -> &[u8; N] {
        &self.0
    }

    /// Returns the channel values as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Returns the channel values as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl<const N: usize> Default for Pixel<N> {
    fn default() -> Self {
        Self::new([0; N])
    }
}

impl<const N: usize> std::fmt::Debug for Pixel<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pixel{:?}", self.0)
    }
}

impl<const N: usize> From<[u8; N]> for Pixel<N> {
    #[inline]
    fn from(values: [u8; N]) -> Self {
        Self::new(values)
    }
}

impl<const N: usize> From<Pixel<N>> for [u8; N] {
    #[inline]
    fn from(pixel: Pixel<N>) -> Self {
        pixel.0
    }
}

impl<const N: usize> TryFrom<&[u8]> for Pixel<N> {
    type Error = Error;

    fn try_from(values: &[u8]) -> Result<Self> {
        Self::from_slice(values)
    }
}

impl<const N: usize> Index<usize> for Pixel<N> {
    type Output = u8;

    /// # Panics
    ///
    /// Panics if `index >= N`, in every build profile.
    #[inline]
    fn index(&self, index: usize) -> &u8 {
        assert!(index < N, "channel {index} out of bounds for {N}-channel pixel");
        &self.0[index]
    }
}

impl<const N: usize> IndexMut<usize> for Pixel<N> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut u8 {
        assert!(index < N, "channel {index} out of bounds for {N}-channel pixel");
        &mut self.0[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_new() {
        let px = Pixel::new([10, 20, 30, 40]);
        assert_eq!(px.channels(), 4);
        assert_eq!(Pixel4::CHANNELS, 4);
        assert_eq!(px[0], 10);
        assert_eq!(px[3], 40);
    }

    #[test]
    fn test_pixel_index_mut() {
        let mut px = Pixel1::default();
        px[0] = 200;
        assert_eq!(px.as_array(), &[200]);
    }

    #[test]
    #[should_panic(expected = "channel 3 out of bounds")]
    fn test_pixel_index_out_of_bounds_panics() {
        let px = Pixel3::new([1, 2, 3]);
        let _ = px[3];
    }

    #[test]
    fn test_pixel_checked_channel() {
        let mut px = Pixel2::new([5, 6]);
        assert_eq!(px.channel(1), Ok(6));
        assert_eq!(
            px.channel(2),
            Err(Error::ChannelOutOfBounds {
                index: 2,
                channels: 2
            })
        );
        px.set_channel(0, 9).unwrap();
        assert_eq!(px.as_slice(), &[9, 6]);
        assert!(px.set_channel(5, 1).unwrap_err().is_bounds_error());
    }

    #[test]
    fn test_pixel_arity_error() {
        let err = Pixel::<4>::from_slice(&[1, 2, 3]).unwrap_err();
        assert_eq!(err, Error::Arity { expected: 4, got: 3 });

        let ok: Pixel<2> = [7u8, 8].as_slice().try_into().unwrap();
        assert_eq!(<[u8; 2]>::from(ok), [7, 8]);
    }

    #[test]
    fn test_pixel_layout_is_packed() {
        assert_eq!(std::mem::size_of::<Pixel3>(), 3);
        assert_eq!(std::mem::align_of::<Pixel3>(), 1);
        let bytes = [1u8, 2, 3, 4, 5, 6];
        let pixels: &[Pixel3] = bytemuck::cast_slice(&bytes);
        assert_eq!(pixels, &[Pixel::new([1, 2, 3]), Pixel::new([4, 5, 6])]);
    }

    #[test]
    fn test_pixel_debug() {
        assert_eq!(format!("{:?}", Pixel::new([1, 2])), "Pixel[1, 2]");
    }
}
