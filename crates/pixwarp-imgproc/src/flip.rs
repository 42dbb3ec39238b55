use pixwarp_image::{Image, ImageError, Pixel};
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Flip the input image horizontally.
///
/// # Arguments
///
/// * `src` - The input image.
///
/// # Returns
///
/// The flipped image.
///
/// # Example
///
/// ```
/// use pixwarp_image::{Gray8, Image, ImageSize};
/// use pixwarp_imgproc::flip::horizontal_flip;
///
/// let image = Image::new(
///     ImageSize {
///         width: 2,
///         height: 3,
///     },
///     vec![Gray8(0); 2 * 3],
/// )
/// .unwrap();
///
/// let flipped = horizontal_flip(&image).unwrap();
///
/// assert_eq!(flipped.size().width, 2);
/// assert_eq!(flipped.size().height, 3);
/// ```
pub fn horizontal_flip<P: Pixel>(src: &Image<P>) -> Result<Image<P>, ImageError> {
    let mut dst = src.clone();
    let cols = src.cols().max(1);

    dst.lock_mut()
        .as_mut_slice()
        .par_chunks_exact_mut(cols)
        .for_each(|row| row.reverse());

    Ok(dst)
}

/// Flip the input image vertically.
///
/// # Arguments
///
/// * `src` - The input image.
///
/// # Returns
///
/// The flipped image.
pub fn vertical_flip<P: Pixel>(src: &Image<P>) -> Result<Image<P>, ImageError> {
    let mut dst = Image::from_size_default(src.size())?;
    let cols = src.cols().max(1);
    let rows = src.rows();
    let source = src.lock();

    dst.lock_mut()
        .as_mut_slice()
        .par_chunks_exact_mut(cols)
        .enumerate()
        .for_each(|(y, row)| {
            if let Some(src_row) = source.row(rows - y - 1) {
                row.copy_from_slice(src_row);
            }
        });

    Ok(dst)
}
