use crate::accessor::{PixelAccessor, PixelAccessorMut};
use crate::error::ImageError;
use crate::pixel::Pixel;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use pixwarp_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// The number of pixels covered by the size.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// The size with width and height exchanged.
    pub fn transposed(&self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Allocate a buffer of `len` default pixels, reporting allocation failure
/// as an error instead of aborting.
pub(crate) fn try_alloc<P: Pixel>(len: usize, val: P) -> Result<Vec<P>, ImageError> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| ImageError::AllocationFailed(len))?;
    data.resize(len, val);
    Ok(data)
}

/// Represents an image with pixel data.
///
/// The pixels are stored row-major in a flat buffer of length `width * height`.
/// Reading and writing goes through the scoped accessors returned by
/// [`Image::lock`] and [`Image::lock_mut`].
#[derive(Clone, Debug, PartialEq)]
pub struct Image<P: Pixel> {
    size: ImageSize,
    data: Vec<P>,
}

impl<P: Pixel> Image<P> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image in row-major order.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixwarp_image::{Gray8, Image, ImageSize};
    ///
    /// let image = Image::new(
    ///    ImageSize {
    ///       width: 10,
    ///       height: 20,
    ///    },
    ///    vec![Gray8(0); 10 * 20],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// ```
    pub fn new(size: ImageSize, data: Vec<P>) -> Result<Self, ImageError> {
        if data.len() != size.area() {
            return Err(ImageError::InvalidChannelShape(data.len(), size.area()));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size filled with `val`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::AllocationFailed`] when the buffer cannot be allocated.
    pub fn from_size_val(size: ImageSize, val: P) -> Result<Self, ImageError> {
        let data = try_alloc(size.area(), val)?;
        Ok(Self { size, data })
    }

    /// Create a new image with the given size filled with default pixels.
    pub fn from_size_default(size: ImageSize) -> Result<Self, ImageError> {
        Self::from_size_val(size, P::default())
    }

    /// Create a new image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(size: ImageSize, f: impl Fn(usize, usize) -> P) -> Result<Self, ImageError> {
        let mut data = Vec::new();
        data.try_reserve_exact(size.area())
            .map_err(|_| ImageError::AllocationFailed(size.area()))?;
        for y in 0..size.height {
            for x in 0..size.width {
                data.push(f(x, y));
            }
        }
        Ok(Self { size, data })
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the pixel data of the image in row-major order.
    pub fn as_slice(&self) -> &[P] {
        &self.data
    }

    /// Iterate over the pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = P> + '_ {
        self.data.iter().copied()
    }

    /// Acquire a read-only accessor over the pixels.
    ///
    /// The accessor is `Copy` and `Sync`, so it can be shared freely across
    /// worker threads for as long as the borrow lasts.
    pub fn lock(&self) -> PixelAccessor<'_, P> {
        PixelAccessor::new(self.size, &self.data)
    }

    /// Acquire an exclusive accessor over the pixels.
    pub fn lock_mut(&mut self) -> PixelAccessorMut<'_, P> {
        PixelAccessorMut::new(self.size, &mut self.data)
    }

    /// Replace buffer and dimensions with the ones of `other` in a single move.
    ///
    /// Transforms build their full result before calling this, so callers
    /// never observe a partially written image.
    pub fn replace_with(&mut self, other: Image<P>) {
        *self = other;
    }
}
