//! Owning pixel storage.
//!
//! [`PixelBuffer<N>`] is the unit of ownership that moves in and out of an
//! image buffer. It owns a `Vec<u8>` of interleaved samples whose length is
//! always a whole number of pixels, and derefs to `[Pixel<N>]`:
//!
//! ```
//! use imgbuf_core::{Pixel, PixelBuffer};
//!
//! let mut buf = PixelBuffer::<3>::from_raw(vec![0; 6]).unwrap();
//! assert_eq!(buf.len(), 2);
//! buf[1] = Pixel::new([9, 8, 7]);
//! assert_eq!(buf.into_raw(), vec![0, 0, 0, 9, 8, 7]);
//! ```
//!
//! The memory is released when the value is dropped. Each allocation has
//! exactly one owner and is freed exactly once; `clone` makes a deep copy
//! with its own allocation.

use crate::{Error, Pixel, Result};
use std::ops::{Deref, DerefMut};

/// Ownership state of an image buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferState {
    /// No backing memory has been attached yet.
    Empty,
    /// The buffer exclusively owns `width * height * N` bytes.
    Owned,
    /// The backing memory was handed to the caller; terminal.
    Released,
}

impl BufferState {
    /// Lowercase name used in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            BufferState::Empty => "empty",
            BufferState::Owned => "owned",
            BufferState::Released => "released",
        }
    }
}

impl std::fmt::Display for BufferState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single-owner sequence of [`Pixel<N>`]; `clone` makes a deep copy.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PixelBuffer<const N: usize> {
    /// Interleaved samples; `data.len() % N == 0`.
    data: Vec<u8>,
}

impl<const N: usize> PixelBuffer<N> {
    /// Adopts raw interleaved samples without copying.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] if `data.len()` is not a multiple of `N`.
    pub fn from_raw(data: Vec<u8>) -> Result<Self> {
        let channels = Pixel::<N>::CHANNELS;
        if data.len() % channels != 0 {
            return Err(Error::InvalidLength {
                len: data.len(),
                channels,
            });
        }
        Ok(Self { data })
    }

    /// Adopts a vector of pixels without copying.
    pub fn from_pixels(pixels: Vec<Pixel<N>>) -> Self {
        let _ = Pixel::<N>::CHANNELS;
        // Pixel<N> has alignment 1, so the allocation reinterprets in place.
        Self {
            data: bytemuck::allocation::cast_vec(pixels),
        }
    }

    /// Allocates `len` pixels, every one set to `pixel`.
    pub fn filled(len: usize, pixel: Pixel<N>) -> Self {
        Self::from_pixels(vec![pixel; len])
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len() / N
    }

    /// Returns `true` if the buffer holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Interleaved samples.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable interleaved samples.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Pixel view over the samples.
    #[inline]
    pub fn as_pixels(&self) -> &[Pixel<N>] {
        bytemuck::cast_slice(&self.data)
    }

    /// Mutable pixel view over the samples.
    #[inline]
    pub fn as_pixels_mut(&mut self) -> &mut [Pixel<N>] {
        bytemuck::cast_slice_mut(&mut self.data)
    }

    /// Gives up the typed view and returns the sample vector.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

impl<const N: usize> Deref for PixelBuffer<N> {
    type Target = [Pixel<N>];

    #[inline]
    fn deref(&self) -> &[Pixel<N>] {
        self.as_pixels()
    }
}

impl<const N: usize> DerefMut for PixelBuffer<N> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [Pixel<N>] {
        self.as_pixels_mut()
    }
}

impl<const N: usize> From<Vec<Pixel<N>>> for PixelBuffer<N> {
    fn from(pixels: Vec<Pixel<N>>) -> Self {
        Self::from_pixels(pixels)
    }
}

impl<const N: usize> TryFrom<Vec<u8>> for PixelBuffer<N> {
    type Error = Error;

    fn try_from(data: Vec<u8>) -> Result<Self> {
        Self::from_raw(data)
    }
}

impl<const N: usize> std::fmt::Debug for PixelBuffer<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("pixels", &self.len())
            .field("channels", &N)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_validates_length() {
        assert!(PixelBuffer::<3>::from_raw(vec![0; 9]).is_ok());
        assert_eq!(
            PixelBuffer::<3>::from_raw(vec![0; 7]).unwrap_err(),
            Error::InvalidLength {
                len: 7,
                channels: 3
            }
        );
        assert!(PixelBuffer::<4>::from_raw(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_from_pixels_keeps_order() {
        let buf = PixelBuffer::from_pixels(vec![Pixel::new([1, 2]), Pixel::new([3, 4])]);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.as_bytes(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_from_pixels_does_not_copy() {
        let pixels = vec![Pixel::new([5u8, 6, 7]); 16];
        let ptr = pixels.as_ptr() as *const u8;
        let buf = PixelBuffer::from_pixels(pixels);
        assert_eq!(buf.as_bytes().as_ptr(), ptr);
    }

    #[test]
    fn test_clone_is_deep() {
        let buf = PixelBuffer::<2>::from_raw(vec![1, 2, 3, 4]).unwrap();
        let mut copy = buf.clone();
        assert_eq!(copy, buf);
        assert_ne!(copy.as_bytes().as_ptr(), buf.as_bytes().as_ptr());

        copy[0] = Pixel::new([9, 9]);
        assert_eq!(buf.as_bytes(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_mutation_through_view() {
        let mut buf = PixelBuffer::filled(3, Pixel::new([0u8]));
        buf[2][0] = 42;
        for px in buf.iter_mut().take(1) {
            px[0] = 7;
        }
        assert_eq!(buf.into_raw(), vec![7, 0, 42]);
    }

    #[test]
    fn test_buffer_state_display() {
        assert_eq!(BufferState::Owned.to_string(), "owned");
        assert_eq!(BufferState::Empty.as_str(), "empty");
    }
}
