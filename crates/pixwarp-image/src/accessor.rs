use crate::error::ImageError;
use crate::image::ImageSize;
use crate::pixel::Pixel;

/// A read-only, bounds-checked view over the pixels of an image.
///
/// Obtained from [`crate::Image::lock`]. The view is released when the borrow
/// ends, which holds on every exit path of the enclosing scope.
#[derive(Clone, Copy, Debug)]
pub struct PixelAccessor<'a, P: Pixel> {
    size: ImageSize,
    data: &'a [P],
}

impl<'a, P: Pixel> PixelAccessor<'a, P> {
    pub(crate) fn new(size: ImageSize, data: &'a [P]) -> Self {
        debug_assert_eq!(size.area(), data.len());
        Self { size, data }
    }

    /// The size of the underlying image.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The width of the underlying image.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// The height of the underlying image.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the pixel at `(x, y)`, or `None` when outside the image.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<P> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.data.get(y * self.size.width + x).copied()
    }

    /// Get the pixel at `(x, y)` with both coordinates clamped to the image.
    ///
    /// Returns `None` only for an empty image.
    #[inline]
    pub fn get_clamped(&self, x: i64, y: i64) -> Option<P> {
        if self.data.is_empty() {
            return None;
        }
        let x = x.clamp(0, self.size.width as i64 - 1) as usize;
        let y = y.clamp(0, self.size.height as i64 - 1) as usize;
        self.get(x, y)
    }

    /// Get a full row of pixels.
    pub fn row(&self, y: usize) -> Option<&'a [P]> {
        if y >= self.size.height {
            return None;
        }
        let start = y * self.size.width;
        self.data.get(start..start + self.size.width)
    }

    /// The pixels in row-major order.
    pub fn as_slice(&self) -> &'a [P] {
        self.data
    }
}

/// An exclusive, bounds-checked view over the pixels of an image.
///
/// Obtained from [`crate::Image::lock_mut`]. Concurrent writers get disjoint
/// row slices through [`PixelAccessorMut::rows_mut`] or by chunking
/// [`PixelAccessorMut::as_mut_slice`] by [`PixelAccessorMut::width`]; no two
/// rows share memory, so no locking is required between them.
#[derive(Debug)]
pub struct PixelAccessorMut<'a, P: Pixel> {
    size: ImageSize,
    data: &'a mut [P],
}

impl<'a, P: Pixel> PixelAccessorMut<'a, P> {
    pub(crate) fn new(size: ImageSize, data: &'a mut [P]) -> Self {
        debug_assert_eq!(size.area(), data.len());
        Self { size, data }
    }

    /// The size of the underlying image.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The width of the underlying image.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// The height of the underlying image.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the pixel at `(x, y)`, or `None` when outside the image.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<P> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.data.get(y * self.size.width + x).copied()
    }

    /// Write `pixel` at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::PixelIndexOutOfBounds`] when `(x, y)` is outside the image.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, pixel: P) -> Result<(), ImageError> {
        if x >= self.size.width || y >= self.size.height {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.size.width,
                self.size.height,
            ));
        }
        self.data[y * self.size.width + x] = pixel;
        Ok(())
    }

    /// Iterate over the rows as disjoint mutable slices, paired with their index.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = (usize, &mut [P])> + '_ {
        // a zero width image has an empty buffer, so the chunk size is irrelevant
        self.data
            .chunks_exact_mut(self.size.width.max(1))
            .enumerate()
    }

    /// The pixels in row-major order.
    pub fn as_mut_slice(&mut self) -> &mut [P] {
        &mut *self.data
    }

    /// Reborrow as a read-only accessor.
    pub fn as_accessor(&self) -> PixelAccessor<'_, P> {
        PixelAccessor::new(self.size, &*self.data)
    }
}
