//! The [`ImageBuffer`] ownership state machine.
//!
//! An image buffer is in one of three states:
//!
//! ```text
//! Empty --read(ok)--> Owned --release--> Released
//!   ^                  |  \
//!   +---read(fail)-----+   +--resize--> Owned (new instance)
//!
//! PixelBuffer --from_buffer--> Owned
//! ```
//!
//! Only `Owned` holds memory. The memory lives inside the state enum, so
//! releasing it moves it out and dropping the buffer frees whatever is
//! still held; nothing can be freed twice or leaked.
//!
//! # Memory Layout
//!
//! Pixels are stored row-major, top-to-bottom, channels interleaved, no
//! row padding:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use imgbuf::{ImageBuffer3, Pixel3};
//!
//! let mut image = ImageBuffer3::open("photo.jpg");
//! if image.is_valid() {
//!     *image.at_mut(0, 0)? = Pixel3::new([255, 0, 0]);
//!     let thumb = image.resize_to_width(64)?;
//!     thumb.write("thumb.png")?;
//! }
//! # Ok::<(), imgbuf::ImageError>(())
//! ```

use crate::ImageResult;
use imgbuf_core::{BufferState, Error, Pixel, PixelBuffer, Result};
use imgbuf_io::{Codec, FileCodec, Format, ImageData, IoError, RawImage};
use imgbuf_ops::{ChannelLayout, Extent, OpsError, Resampler, SrgbResampler};
use std::ops::{Index, IndexMut};
use std::path::Path;
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Default)]
enum Storage<const N: usize> {
    #[default]
    Empty,
    Owned(PixelBuffer<N>),
    Released,
}

impl<const N: usize> Storage<N> {
    fn state(&self) -> BufferState {
        match self {
            Storage::Empty => BufferState::Empty,
            Storage::Owned(_) => BufferState::Owned,
            Storage::Released => BufferState::Released,
        }
    }
}

/// Image of `N`-channel 8-bit pixels with explicit ownership of its memory.
///
/// `clone` deep-copies the pixels; the copy owns a separate allocation.
///
/// Every data access, write, resize and release requires the `Owned`
/// state and fails with [`Error::InvalidState`] otherwise. Dimension
/// getters and [`is_valid`](Self::is_valid) work in every state.
#[derive(Debug, Clone, Default)]
pub struct ImageBuffer<const N: usize> {
    width: usize,
    height: usize,
    source_channels: u32,
    storage: Storage<N>,
}

impl<const N: usize> ImageBuffer<N> {
    /// Channels per pixel.
    pub const CHANNELS: usize = Pixel::<N>::CHANNELS;

    /// Creates an empty, invalid buffer.
    pub fn new() -> Self {
        Self::default()
    }

    // -- Decoding -----------------------------------------------------------

    /// Decodes `path` with the default codec.
    ///
    /// On failure the buffer comes back empty (`is_valid() == false`, zero
    /// dimensions) and the error is logged. Use [`try_open`](Self::try_open)
    /// to get the error instead.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::try_open(path) {
            Ok(image) => image,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to decode image");
                Self::new()
            }
        }
    }

    /// Decodes `path` with the default codec, returning any failure.
    pub fn try_open<P: AsRef<Path>>(path: P) -> ImageResult<Self> {
        Self::open_with(&FileCodec::new(), path)
    }

    /// Decodes `path` with the given codec.
    pub fn open_with<C, P>(codec: &C, path: P) -> ImageResult<Self>
    where
        C: Codec + ?Sized,
        P: AsRef<Path>,
    {
        let mut image = Self::new();
        image.read_with(codec, path)?;
        Ok(image)
    }

    /// Decodes an encoded image held in memory, detecting its format.
    pub fn from_memory(bytes: &[u8]) -> ImageResult<Self> {
        Self::from_memory_with(&FileCodec::new(), bytes)
    }

    /// Decodes an encoded image held in memory with the given codec.
    pub fn from_memory_with<C: Codec + ?Sized>(codec: &C, bytes: &[u8]) -> ImageResult<Self> {
        let decoded = codec.decode_memory(bytes, N as u32)?;
        let mut image = Self::new();
        image.adopt_decoded(decoded)?;
        Ok(image)
    }

    /// Decodes `path` into this buffer with the default codec.
    ///
    /// See [`read_with`](Self::read_with).
    pub fn read<P: AsRef<Path>>(&mut self, path: P) -> ImageResult<()> {
        self.read_with(&FileCodec::new(), path)
    }

    /// Decodes `path` into this buffer.
    ///
    /// Memory held before the call is freed first. On success the buffer
    /// is `Owned`; on failure it is `Empty` and the error is returned.
    /// A released buffer rejects the call without touching the codec.
    pub fn read_with<C, P>(&mut self, codec: &C, path: P) -> ImageResult<()>
    where
        C: Codec + ?Sized,
        P: AsRef<Path>,
    {
        if let Storage::Released = self.storage {
            return Err(Error::invalid_state("read", BufferState::Released).into());
        }
        self.clear();

        let decoded = codec.decode(path.as_ref(), N as u32)?;
        debug!(
            path = %path.as_ref().display(),
            width = decoded.width,
            height = decoded.height,
            native_channels = decoded.native_channels,
            channels = N,
            "decoded into image buffer"
        );
        self.adopt_decoded(decoded)
    }

    fn adopt_decoded(&mut self, decoded: ImageData) -> ImageResult<()> {
        if decoded.channels as usize != N {
            return Err(IoError::DimensionMismatch {
                expected: format!("{N} channels"),
                actual: format!("{} channels", decoded.channels),
            }
            .into());
        }
        let width = decoded.width as usize;
        let height = decoded.height as usize;
        let buffer = PixelBuffer::from_raw(decoded.data)?;
        if buffer.len() != width * height {
            return Err(Error::size_mismatch(width * height, buffer.len()).into());
        }

        self.width = width;
        self.height = height;
        self.source_channels = decoded.native_channels;
        self.storage = Storage::Owned(buffer);
        Ok(())
    }

    fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.source_channels = 0;
        self.storage = Storage::Empty;
    }

    // -- Encoding -----------------------------------------------------------

    /// Writes the image, choosing the format from the file extension
    /// (`.png`, `.jpg`/`.jpeg`, `.bmp`).
    pub fn write<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        let path = path.as_ref();
        self.write_with(&FileCodec::new(), path, Format::from_extension(path))
    }

    /// Writes the image in an explicit format.
    pub fn write_as<P: AsRef<Path>>(&self, path: P, format: Format) -> ImageResult<()> {
        self.write_with(&FileCodec::new(), path, format)
    }

    /// Writes the image through the given codec.
    pub fn write_with<C, P>(&self, codec: &C, path: P, format: Format) -> ImageResult<()>
    where
        C: Codec + ?Sized,
        P: AsRef<Path>,
    {
        let buffer = self.owned("write")?;
        let (width, height) = match (u32::try_from(self.width), u32::try_from(self.height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(IoError::EncodeError(format!(
                    "{}x{} exceeds encoder limits",
                    self.width, self.height
                ))
                .into());
            }
        };
        let raw = RawImage::new(width, height, N as u32, buffer.as_bytes())?;
        codec.encode(path.as_ref(), format, raw)?;
        Ok(())
    }

    // -- State and dimensions -----------------------------------------------

    /// Returns `true` if the buffer owns pixel memory.
    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self.storage, Storage::Owned(_))
    }

    /// Returns the ownership state.
    #[inline]
    pub fn state(&self) -> BufferState {
        self.storage.state()
    }

    /// Width in pixels (0 unless owned).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels (0 unless owned).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Channel count the decoder found in the source file.
    ///
    /// Diagnostic only; the buffer always holds `N` channels.
    #[inline]
    pub fn source_channels(&self) -> u32 {
        self.source_channels
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    fn owned(&self, operation: &'static str) -> Result<&PixelBuffer<N>> {
        match &self.storage {
            Storage::Owned(buffer) => Ok(buffer),
            other => Err(Error::invalid_state(operation, other.state())),
        }
    }

    fn owned_mut(&mut self, operation: &'static str) -> Result<&mut PixelBuffer<N>> {
        match &mut self.storage {
            Storage::Owned(buffer) => Ok(buffer),
            other => Err(Error::invalid_state(operation, other.state())),
        }
    }

    // -- Pixel access -------------------------------------------------------

    /// All pixels in row-major order.
    pub fn pixels(&self) -> Result<&[Pixel<N>]> {
        Ok(self.owned("read pixels")?.as_pixels())
    }

    /// All pixels in row-major order, mutable. Writes go to the buffer.
    pub fn pixels_mut(&mut self) -> Result<&mut [Pixel<N>]> {
        Ok(self.owned_mut("write pixels")?.as_pixels_mut())
    }

    /// Interleaved samples, `width * height * N` bytes.
    pub fn as_bytes(&self) -> Result<&[u8]> {
        Ok(self.owned("read samples")?.as_bytes())
    }

    /// Interleaved samples, mutable.
    pub fn as_bytes_mut(&mut self) -> Result<&mut [u8]> {
        Ok(self.owned_mut("write samples")?.as_bytes_mut())
    }

    /// Pixels of row `y`.
    pub fn row(&self, y: usize) -> Result<&[Pixel<N>]> {
        let (width, height) = (self.width, self.height);
        let pixels = self.owned("read row")?.as_pixels();
        if y >= height {
            return Err(Error::out_of_bounds(0, y, width, height));
        }
        Ok(&pixels[y * width..][..width])
    }

    /// Pixels of row `y`, mutable.
    pub fn row_mut(&mut self, y: usize) -> Result<&mut [Pixel<N>]> {
        let (width, height) = (self.width, self.height);
        let pixels = self.owned_mut("write row")?.as_pixels_mut();
        if y >= height {
            return Err(Error::out_of_bounds(0, y, width, height));
        }
        Ok(&mut pixels[y * width..][..width])
    }

    /// Pixel at column `col`, row `row`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] unless owned, [`Error::OutOfBounds`] unless
    /// `col < width` and `row < height`.
    pub fn at(&self, col: usize, row: usize) -> Result<&Pixel<N>> {
        let (width, height) = (self.width, self.height);
        let pixels = self.owned("read pixel")?.as_pixels();
        if col >= width || row >= height {
            return Err(Error::out_of_bounds(col, row, width, height));
        }
        Ok(&pixels[row * width + col])
    }

    /// Mutable pixel at column `col`, row `row`.
    pub fn at_mut(&mut self, col: usize, row: usize) -> Result<&mut Pixel<N>> {
        let (width, height) = (self.width, self.height);
        let pixels = self.owned_mut("write pixel")?.as_pixels_mut();
        if col >= width || row >= height {
            return Err(Error::out_of_bounds(col, row, width, height));
        }
        Ok(&mut pixels[row * width + col])
    }

    /// Pixel at `(col, row)`, or `None` if invalid or out of bounds.
    pub fn get(&self, col: usize, row: usize) -> Option<&Pixel<N>> {
        self.at(col, row).ok()
    }

    /// Sets every pixel to `pixel`.
    pub fn fill(&mut self, pixel: Pixel<N>) -> Result<()> {
        self.pixels_mut()?.fill(pixel);
        Ok(())
    }

    // -- Adopting external memory -------------------------------------------

    /// Adopts `buffer` as a `width x height` image without copying.
    ///
    /// The buffer is consumed, so the caller can neither free nor reuse it.
    ///
    /// # Errors
    ///
    /// [`Error::SizeMismatch`] if `buffer.len() != width * height`.
    pub fn from_buffer(buffer: PixelBuffer<N>, width: usize, height: usize) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .ok_or_else(|| Error::size_mismatch(usize::MAX, buffer.len()))?;
        if buffer.len() != expected {
            return Err(Error::size_mismatch(expected, buffer.len()));
        }
        trace!(width, height, channels = N, "adopting pixel buffer");

        Ok(Self {
            width,
            height,
            source_channels: N as u32,
            storage: Storage::Owned(buffer),
        })
    }

    /// Adopts a pixel vector without copying.
    pub fn from_pixels(pixels: Vec<Pixel<N>>, width: usize, height: usize) -> Result<Self> {
        Self::from_buffer(PixelBuffer::from_pixels(pixels), width, height)
    }

    /// Adopts interleaved samples (`width * height * N` bytes).
    pub fn from_raw(data: Vec<u8>, width: usize, height: usize) -> Result<Self> {
        Self::from_buffer(PixelBuffer::from_raw(data)?, width, height)
    }

    // -- Resampling ---------------------------------------------------------

    /// Returns a resized copy made by the sRGB-aware default resampler.
    ///
    /// The source is left unchanged.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] unless owned; [`OpsError::InvalidDimensions`]
    /// if either target dimension is zero.
    pub fn resize(&self, width: usize, height: usize) -> ImageResult<Self> {
        self.resize_with(&SrgbResampler::new(), width, height)
    }

    /// Returns a copy resized by `resampler`.
    pub fn resize_with<R>(&self, resampler: &R, width: usize, height: usize) -> ImageResult<Self>
    where
        R: Resampler + ?Sized,
    {
        let buffer = self.owned("resize")?;
        trace!(
            from_width = self.width,
            from_height = self.height,
            to_width = width,
            to_height = height,
            channels = N,
            "resize"
        );

        let src_extent = Extent::packed(self.width, self.height, N);
        let dst_extent = Extent::packed(width, height, N);
        let samples = resampler.resize(
            buffer.as_bytes(),
            src_extent,
            dst_extent,
            ChannelLayout::for_pixel::<N>(),
        )?;
        if samples.len() != dst_extent.byte_len(N) {
            return Err(OpsError::SizeMismatch(format!(
                "resampler returned {} bytes for {}x{}x{}",
                samples.len(),
                width,
                height,
                N
            ))
            .into());
        }

        Ok(Self {
            width,
            height,
            source_channels: self.source_channels,
            storage: Storage::Owned(PixelBuffer::from_raw(samples)?),
        })
    }

    /// Resizes to `width`, keeping the aspect ratio.
    ///
    /// The new height is `height * width / self.width`, truncated.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidDimensions`] if `height * width` overflows.
    ///
    /// # Panics
    ///
    /// If the buffer is owned but has zero width.
    pub fn resize_to_width(&self, width: usize) -> ImageResult<Self> {
        self.owned("resize")?;
        assert!(self.width != 0, "cannot keep aspect ratio of a zero-width image");
        let height = self.height.checked_mul(width).ok_or_else(|| {
            OpsError::InvalidDimensions(format!(
                "{}x{} scaled to width {} overflows",
                self.width, self.height, width
            ))
        })? / self.width;
        self.resize(width, height)
    }

    /// Resizes to `height`, keeping the aspect ratio.
    ///
    /// The new width is `width * height / self.height`, truncated.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidDimensions`] if `width * height` overflows.
    ///
    /// # Panics
    ///
    /// If the buffer is owned but has zero height.
    pub fn resize_to_height(&self, height: usize) -> ImageResult<Self> {
        self.owned("resize")?;
        assert!(self.height != 0, "cannot keep aspect ratio of a zero-height image");
        let width = self.width.checked_mul(height).ok_or_else(|| {
            OpsError::InvalidDimensions(format!(
                "{}x{} scaled to height {} overflows",
                self.width, self.height, height
            ))
        })? / self.height;
        self.resize(width, height)
    }

    // -- Releasing ----------------------------------------------------------

    /// Moves the pixel memory out, leaving the buffer `Released`.
    ///
    /// The returned buffer holds `width * height` pixels; afterwards the
    /// dimensions read 0 and every data operation fails.
    pub fn release(&mut self) -> Result<PixelBuffer<N>> {
        match std::mem::replace(&mut self.storage, Storage::Released) {
            Storage::Owned(buffer) => {
                trace!(width = self.width, height = self.height, channels = N, "release");
                self.width = 0;
                self.height = 0;
                self.source_channels = 0;
                Ok(buffer)
            }
            other => {
                let state = other.state();
                self.storage = other;
                Err(Error::invalid_state("release", state))
            }
        }
    }

    /// Consumes the buffer and returns its pixel memory.
    pub fn into_buffer(self) -> Result<PixelBuffer<N>> {
        match self.storage {
            Storage::Owned(buffer) => Ok(buffer),
            other => Err(Error::invalid_state("release", other.state())),
        }
    }
}

/// Equal when state, dimensions and pixels match. The source channel
/// count is diagnostic and ignored.
impl<const N: usize> PartialEq for ImageBuffer<N> {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && match (&self.storage, &other.storage) {
                (Storage::Owned(a), Storage::Owned(b)) => a == b,
                (a, b) => a.state() == b.state(),
            }
    }
}

impl<const N: usize> Eq for ImageBuffer<N> {}

impl<const N: usize> TryFrom<ImageBuffer<N>> for PixelBuffer<N> {
    type Error = Error;

    fn try_from(image: ImageBuffer<N>) -> Result<Self> {
        image.into_buffer()
    }
}

impl<const N: usize> Index<(usize, usize)> for ImageBuffer<N> {
    type Output = Pixel<N>;

    /// # Panics
    ///
    /// If the buffer is not owned or `(col, row)` is out of bounds.
    fn index(&self, (col, row): (usize, usize)) -> &Pixel<N> {
        self.at(col, row).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl<const N: usize> IndexMut<(usize, usize)> for ImageBuffer<N> {
    fn index_mut(&mut self, (col, row): (usize, usize)) -> &mut Pixel<N> {
        self.at_mut(col, row).unwrap_or_else(|e| panic!("{e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImageError;
    use std::cell::Cell;

    fn ramp(width: usize, height: usize) -> ImageBuffer<3> {
        let data = (0..width * height * 3).map(|i| i as u8).collect();
        ImageBuffer::from_raw(data, width, height).unwrap()
    }

    /// Codec that counts calls and decodes a fixed solid image.
    #[derive(Default)]
    struct FakeCodec {
        calls: Cell<usize>,
        fail: bool,
    }

    impl Codec for FakeCodec {
        fn decode(&self, _path: &Path, desired: u32) -> imgbuf_io::IoResult<ImageData> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(IoError::DecodeError("corrupt".into()));
            }
            let mut image = ImageData::new(2, 3, desired, vec![9; 6 * desired as usize])?;
            image.native_channels = 1;
            Ok(image)
        }

        fn decode_memory(&self, _bytes: &[u8], desired: u32) -> imgbuf_io::IoResult<ImageData> {
            self.decode(Path::new("memory"), desired)
        }

        fn encode(&self, _: &Path, _: Format, _: RawImage<'_>) -> imgbuf_io::IoResult<()> {
            self.calls.set(self.calls.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn test_new_is_empty() {
        let image = ImageBuffer::<4>::new();
        assert!(!image.is_valid());
        assert_eq!(image.state(), BufferState::Empty);
        assert_eq!(image.dimensions(), (0, 0));
        assert!(image.pixels().unwrap_err().is_state_error());
        assert!(image.resize(1, 1).unwrap_err().is_invalid_state());
    }

    #[test]
    fn test_read_with_codec() {
        let codec = FakeCodec::default();
        let mut image = ImageBuffer::<3>::new();
        image.read_with(&codec, "any").unwrap();

        assert!(image.is_valid());
        assert_eq!(image.dimensions(), (2, 3));
        assert_eq!(image.source_channels(), 1);
        assert_eq!(image.as_bytes().unwrap().len(), 2 * 3 * 3);
        assert_eq!(codec.calls.get(), 1);
    }

    #[test]
    fn test_failed_read_leaves_empty() {
        let mut image = ramp(4, 4);
        let codec = FakeCodec {
            fail: true,
            ..Default::default()
        };

        let err = image.read_with(&codec, "bad").unwrap_err();
        assert!(err.is_codec_error());
        assert_eq!(image.state(), BufferState::Empty);
        assert_eq!(image.dimensions(), (0, 0));
    }

    #[test]
    fn test_read_after_release_skips_codec() {
        let mut image = ramp(2, 2);
        image.release().unwrap();

        let codec = FakeCodec::default();
        let err = image.read_with(&codec, "x").unwrap_err();
        assert!(err.is_invalid_state());
        assert_eq!(codec.calls.get(), 0);
        assert_eq!(image.state(), BufferState::Released);
    }

    #[test]
    fn test_at_and_index() {
        let mut image = ramp(3, 2);
        assert_eq!(image.at(1, 1).unwrap().as_array(), &[12, 13, 14]);
        assert_eq!(image[(2, 0)], Pixel::new([6, 7, 8]));

        image[(0, 1)] = Pixel::new([1, 1, 1]);
        assert_eq!(image.row(1).unwrap()[0], Pixel::new([1, 1, 1]));

        assert!(image.at(3, 0).unwrap_err().is_bounds_error());
        assert!(image.at(0, 2).unwrap_err().is_bounds_error());
        assert!(image.get(5, 5).is_none());
        assert!(image.row(2).is_err());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_out_of_bounds_panics() {
        let image = ramp(2, 2);
        let _ = image[(2, 0)];
    }

    #[test]
    fn test_mutation_writes_through() {
        let mut image = ramp(2, 2);
        image.fill(Pixel::new([5, 6, 7])).unwrap();
        image.pixels_mut().unwrap()[3][0] = 99;

        let bytes = image.as_bytes().unwrap();
        assert_eq!(&bytes[..3], &[5, 6, 7]);
        assert_eq!(bytes[9], 99);
    }

    #[test]
    fn test_from_buffer_size_mismatch() {
        let buffer = PixelBuffer::<2>::filled(5, Pixel::new([0, 0]));
        let err = ImageBuffer::from_buffer(buffer, 2, 3).unwrap_err();
        assert_eq!(err, Error::SizeMismatch { expected: 6, got: 5 });

        assert!(matches!(
            ImageBuffer::<3>::from_raw(vec![0; 7], 1, 2),
            Err(Error::InvalidLength { len: 7, channels: 3 })
        ));
    }

    #[test]
    fn test_release_twice() {
        let mut image = ramp(2, 1);
        let buffer = image.release().unwrap();
        assert_eq!(buffer.len(), 2);
        assert_eq!(image.dimensions(), (0, 0));
        assert!(!image.is_valid());

        let err = image.release().unwrap_err();
        assert_eq!(err, Error::invalid_state("release", BufferState::Released));
        assert!(image.write("never.png").unwrap_err().is_invalid_state());
    }

    #[test]
    fn test_into_buffer_no_copy() {
        let image = ramp(4, 4);
        let ptr = image.as_bytes().unwrap().as_ptr();
        let buffer = image.into_buffer().unwrap();
        assert_eq!(buffer.as_bytes().as_ptr(), ptr);
        assert!(ImageBuffer::<1>::new().into_buffer().is_err());
    }

    #[test]
    fn test_resize_keeps_source() {
        let image = ramp(4, 2);
        let small = image.resize(2, 1).unwrap();
        assert_eq!(small.dimensions(), (2, 1));
        assert_eq!(image.dimensions(), (4, 2));
        assert!(image.is_valid());
    }

    #[test]
    fn test_resize_zero_target() {
        let err = ramp(2, 2).resize(0, 2).unwrap_err();
        assert!(matches!(err, ImageError::Ops(OpsError::InvalidDimensions(_))));
    }

    #[test]
    fn test_aspect_resizes_truncate() {
        let image = ramp(10, 7);
        assert_eq!(image.resize_to_width(4).unwrap().dimensions(), (4, 2));
        assert_eq!(image.resize_to_height(3).unwrap().dimensions(), (4, 3));
        assert!(ImageBuffer::<3>::new().resize_to_width(4).unwrap_err().is_invalid_state());
    }

    #[test]
    #[should_panic(expected = "zero-width")]
    fn test_resize_to_width_of_zero_width_panics() {
        let image = ImageBuffer::<1>::from_raw(Vec::new(), 0, 5).unwrap();
        let _ = image.resize_to_width(3);
    }

    #[test]
    #[should_panic(expected = "zero-height")]
    fn test_resize_to_height_of_zero_height_panics() {
        let image = ImageBuffer::<1>::from_raw(Vec::new(), 5, 0).unwrap();
        let _ = image.resize_to_height(3);
    }

    #[test]
    fn test_aspect_resize_overflow_is_an_error() {
        let tall = ImageBuffer::<1>::from_raw(vec![0; 2], 1, 2).unwrap();
        let err = tall.resize_to_width(usize::MAX).unwrap_err();
        assert!(matches!(err, ImageError::Ops(OpsError::InvalidDimensions(_))));

        let wide = ImageBuffer::<1>::from_raw(vec![0; 2], 2, 1).unwrap();
        let err = wide.resize_to_height(usize::MAX).unwrap_err();
        assert!(matches!(err, ImageError::Ops(OpsError::InvalidDimensions(_))));
    }

    #[test]
    fn test_write_goes_through_codec() {
        let codec = FakeCodec::default();
        ramp(2, 2).write_with(&codec, "out.png", Format::Png).unwrap();
        assert_eq!(codec.calls.get(), 1);
    }
}
