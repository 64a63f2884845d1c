//! Image buffer type for the simulation pipeline.
//!
//! # Memory Layout
//!
//! Images store pixels in **row-major** order, top-to-bottom, channels
//! interleaved:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//! ```
//!
//! # Ownership
//!
//! The pixel buffer lives in an `Arc<Vec<T>>`: cloning an image is cheap and
//! the first mutation of a shared buffer copies it (copy-on-write). Every
//! pipeline stage takes its inputs by reference and returns a freshly
//! constructed image, so no stage mutates a caller-owned input in place.
//!
//! # Usage
//!
//! ```
//! use kmsim_core::ReflectanceImage;
//!
//! let mut img = ReflectanceImage::filled(64, 64, [0.4, 0.3, 0.25]);
//! img.set_pixel(10, 10, [0.5, 0.5, 0.5]);
//! assert_eq!(img.pixel(10, 10), [0.5, 0.5, 0.5]);
//! ```

use crate::{ColorState, Error, PixelFormat, Result};
use std::marker::PhantomData;
use std::sync::Arc;

/// Owned image buffer with a compile-time color state.
///
/// `Image<C, T, N>` stores interleaved pixel data where:
/// - `C` - color-state marker ([`Srgb`](crate::Srgb), [`Linear`](crate::Linear),
///   [`Label`](crate::Label))
/// - `T` - channel type (`u8` or `f32`)
/// - `N` - channels per pixel (1 or 3 in this workspace)
///
/// See the crate root for the domain aliases
/// ([`ReflectanceImage`](crate::ReflectanceImage),
/// [`ShadingMap`](crate::ShadingMap), [`LabelImage`](crate::LabelImage)).
#[derive(Clone)]
pub struct Image<C: ColorState, T: PixelFormat, const N: usize> {
    /// Pixel data buffer (Arc for cheap cloning).
    data: Arc<Vec<T>>,
    /// Image width in pixels.
    width: u32,
    /// Image height in pixels.
    height: u32,
    /// Color-state marker.
    _state: PhantomData<C>,
}

impl<C: ColorState, T: PixelFormat, const N: usize> Image<C, T, N> {
    /// Creates a new image filled with zeros.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * N;
        Self {
            data: Arc::new(vec![T::zero(); len]),
            width,
            height,
            _state: PhantomData,
        }
    }

    /// Creates an image filled with a specific pixel value.
    ///
    /// # Example
    ///
    /// ```
    /// use kmsim_core::SrgbImage;
    ///
    /// let white = SrgbImage::filled(8, 8, [255, 255, 255]);
    /// assert_eq!(white.pixel(3, 3), [255, 255, 255]);
    /// ```
    pub fn filled(width: u32, height: u32, pixel: [T; N]) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * N);
        for _ in 0..count {
            data.extend_from_slice(&pixel);
        }
        Self {
            data: Arc::new(data),
            width,
            height,
            _state: PhantomData,
        }
    }

    /// Creates an image from existing pixel data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len()` is not exactly
    /// `width * height * N`.
    pub fn from_data(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        let expected = width as usize * height as usize * N;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} elements, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
            _state: PhantomData,
        })
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the number of channels per pixel.
    #[inline]
    pub const fn channels(&self) -> usize {
        N
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if `(x, y)` lies inside the image.
    #[inline]
    pub fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Returns a reference to the raw channel data.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Returns a mutable reference to the channel data.
    ///
    /// If the buffer is shared (Arc refcount > 1) it is cloned first
    /// (copy-on-write).
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    /// Returns the channel offset for the pixel at (x, y).
    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * N
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics in debug builds if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [T; N] {
        debug_assert!(self.in_bounds(x, y), "pixel out of bounds");
        let offset = self.offset(x, y);
        let mut out = [T::zero(); N];
        out.copy_from_slice(&self.data[offset..offset + N]);
        out
    }

    /// Returns the pixel at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[T; N]> {
        if self.in_bounds(x, y) {
            Some(self.pixel(x, y))
        } else {
            None
        }
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics in debug builds if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: [T; N]) {
        debug_assert!(self.in_bounds(x, y), "pixel out of bounds");
        let offset = self.offset(x, y);
        let data = Arc::make_mut(&mut self.data);
        data[offset..offset + N].copy_from_slice(&pixel);
    }

    /// Fills the entire image with a pixel value.
    pub fn fill(&mut self, pixel: [T; N]) {
        let data = Arc::make_mut(&mut self.data);
        for chunk in data.chunks_exact_mut(N) {
            chunk.copy_from_slice(&pixel);
        }
    }

    /// Returns a row of channel data as a slice.
    #[inline]
    pub fn row(&self, y: u32) -> &[T] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.width as usize * N;
        &self.data[start..start + self.width as usize * N]
    }

    /// Iterates over all pixels in row-major order with their coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// use kmsim_core::LabelImage;
    ///
    /// let img = LabelImage::filled(4, 4, [7]);
    /// assert!(img.pixels().all(|(_, _, px)| px == [7]));
    /// ```
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, [T; N])> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| (x, y, self.pixel(x, y))))
    }

    /// Applies a function to each pixel in place.
    pub fn map_pixels<F>(&mut self, f: F)
    where
        F: Fn([T; N]) -> [T; N],
    {
        let data = Arc::make_mut(&mut self.data);
        for chunk in data.chunks_exact_mut(N) {
            let mut px = [T::zero(); N];
            px.copy_from_slice(chunk);
            chunk.copy_from_slice(&f(px));
        }
    }

    /// Returns an error unless `other` has the same dimensions.
    pub fn ensure_same_dimensions<C2: ColorState, T2: PixelFormat, const M: usize>(
        &self,
        other: &Image<C2, T2, M>,
    ) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::dimension_mismatch(
                self.dimensions(),
                other.dimensions(),
            ));
        }
        Ok(())
    }
}

impl<C: ColorState, T: PixelFormat, const N: usize> std::fmt::Debug for Image<C, T, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &N)
            .field("state", &C::NAME)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{LabelImage, ReflectanceImage, SrgbImage};

    #[test]
    fn test_new_zeroed() {
        let img = ReflectanceImage::new(16, 9);
        assert_eq!(img.dimensions(), (16, 9));
        assert_eq!(img.channels(), 3);
        assert_eq!(img.pixel(15, 8), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_filled_and_set() {
        let mut img = SrgbImage::filled(10, 10, [10, 20, 30]);
        assert_eq!(img.pixel(9, 9), [10, 20, 30]);
        img.set_pixel(4, 5, [1, 2, 3]);
        assert_eq!(img.pixel(4, 5), [1, 2, 3]);
        assert_eq!(img.pixel(5, 4), [10, 20, 30]);
    }

    #[test]
    fn test_from_data_wrong_size() {
        let result = LabelImage::from_data(10, 10, vec![0u8; 42]);
        assert!(result.is_err());
    }

    #[test]
    fn test_pixels_row_major() {
        let mut img = LabelImage::new(3, 2);
        img.set_pixel(2, 0, [9]);
        let order: Vec<(u32, u32)> = img.pixels().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(order[0], (0, 0));
        assert_eq!(order[2], (2, 0));
        assert_eq!(order[3], (0, 1));
        assert_eq!(img.pixels().nth(2).unwrap().2, [9]);
    }

    #[test]
    fn test_map_pixels() {
        let mut img = ReflectanceImage::filled(4, 4, [0.25, 0.5, 0.75]);
        img.map_pixels(|px| [px[0] * 2.0, px[1] * 2.0, px[2] * 2.0]);
        assert_eq!(img.pixel(0, 0), [0.5, 1.0, 1.5]);
    }

    #[test]
    fn test_clone_is_cow() {
        let a = ReflectanceImage::filled(4, 4, [0.1, 0.2, 0.3]);
        let mut b = a.clone();
        b.set_pixel(0, 0, [1.0, 1.0, 1.0]);
        assert_eq!(a.pixel(0, 0), [0.1, 0.2, 0.3]);
        assert_eq!(b.pixel(0, 0), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_ensure_same_dimensions() {
        let a = ReflectanceImage::new(8, 8);
        let b = LabelImage::new(8, 8);
        let c = LabelImage::new(8, 9);
        assert!(a.ensure_same_dimensions(&b).is_ok());
        assert!(a.ensure_same_dimensions(&c).is_err());
    }
}
