use pixwarp_image::{Image, Pixel};

use crate::error::TransformError;
use crate::geometry::Matrix;
use crate::interpolation::Resampler;
use crate::parallel::ExecutionStrategy;

use super::resample::{resample_rows, AxisWeights, KernelAccumulation};

/// Applies an affine transformation to an image.
///
/// Unlike [`crate::warp::RotateProcessor`], the caller chooses both the
/// matrix and the destination size, which covers resizing and skewing.
/// Sampling follows the same rules as the rotation path: the source position
/// is truncated toward zero and resampled with `resampler`. Destination
/// pixels whose source position falls outside `src` keep their current value.
///
/// Matrices use the same convention as [`crate::geometry::Point::create_rotation`],
/// so a positive angle turns the image clockwise.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image, already sized.
/// * `m` - The forward transformation, mapping source to destination.
/// * `resampler` - The sampling kernel.
/// * `accumulation` - How continuous kernel taps are combined.
/// * `strategy` - How destination rows are scheduled.
///
/// # Errors
///
/// Returns [`TransformError::InvalidConfiguration`] when `m` is not invertible.
///
/// # Example
///
/// ```
/// use pixwarp_image::{Gray8, Image};
/// use pixwarp_imgproc::geometry::Matrix;
/// use pixwarp_imgproc::interpolation::ResampleKernel;
/// use pixwarp_imgproc::parallel::ExecutionStrategy;
/// use pixwarp_imgproc::warp::{warp_affine, KernelAccumulation};
///
/// let src = Image::from_size_val([4, 5].into(), Gray8(1)).unwrap();
/// let mut dst = Image::from_size_val([4, 5].into(), Gray8(0)).unwrap();
///
/// warp_affine(
///     &src,
///     &mut dst,
///     &Matrix::IDENTITY,
///     &ResampleKernel::Nearest,
///     KernelAccumulation::default(),
///     ExecutionStrategy::Serial,
/// )
/// .unwrap();
///
/// assert_eq!(dst, src);
/// ```
pub fn warp_affine<P: Pixel, R: Resampler + ?Sized>(
    src: &Image<P>,
    dst: &mut Image<P>,
    m: &Matrix,
    resampler: &R,
    accumulation: KernelAccumulation,
    strategy: ExecutionStrategy,
) -> Result<(), TransformError> {
    let determinant = m.matrix2.determinant();
    if determinant == 0.0 || !determinant.is_finite() || !m.translation.is_finite() {
        return Err(TransformError::InvalidConfiguration(format!(
            "affine matrix is not invertible: {m:?}"
        )));
    }

    // destination pixels are looked up in the source
    let m_inv = m.inverse();

    let weights = if resampler.is_nearest() {
        None
    } else {
        Some(AxisWeights::new(resampler, src.size(), dst.size())?)
    };

    log::debug!(
        "warp_affine: {} -> {}, resampler {resampler:?}",
        src.size(),
        dst.size()
    );

    resample_rows(src, dst, &m_inv, weights.as_ref(), accumulation, strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::interpolation::ResampleKernel;
    use crate::warp::{rotate_right_angle, RightAngle};
    use glam::{Vec2, Vec4};
    use pixwarp_image::{Gray8, RgbaF32};

    // clockwise quarter turn of an image of height `h`
    fn quarter_turn(h: f32) -> Matrix {
        Matrix::from_cols(
            Vec2::new(0.0, 1.0),
            Vec2::new(-1.0, 0.0),
            Vec2::new(h - 1.0, 0.0),
        )
    }

    #[test]
    fn warp_affine_identity() -> Result<(), TransformError> {
        let image = Image::new([4, 5].into(), (0..20).map(Gray8).collect())?;
        let mut image_transformed = Image::from_size_default(image.size())?;

        warp_affine(
            &image,
            &mut image_transformed,
            &Matrix::IDENTITY,
            &ResampleKernel::Nearest,
            KernelAccumulation::default(),
            ExecutionStrategy::Serial,
        )?;

        assert_eq!(image_transformed, image);

        Ok(())
    }

    #[test]
    fn warp_affine_quarter_turn_matches_right_angle() -> Result<(), TransformError> {
        let image = Image::new([3, 2].into(), (0..6).map(Gray8).collect())?;
        let mut image_transformed = Image::from_size_default([2, 3].into())?;

        warp_affine(
            &image,
            &mut image_transformed,
            &quarter_turn(2.0),
            &ResampleKernel::Nearest,
            KernelAccumulation::default(),
            ExecutionStrategy::AutoRows,
        )?;

        let expected = rotate_right_angle(&image, RightAngle::Rotate90, ExecutionStrategy::Serial)?;
        assert_eq!(image_transformed, expected);
        assert_eq!(image_transformed.as_slice(), &[3u8, 0, 4, 1, 5, 2].map(Gray8));

        Ok(())
    }

    #[test]
    fn warp_affine_shares_rotation_convention() {
        let rotation = Point::create_rotation(Point::ZERO, 90.0);
        let turn = quarter_turn(2.0);
        assert!(rotation.matrix2.abs_diff_eq(turn.matrix2, 1e-6));
    }

    #[test]
    fn warp_affine_kernel_keeps_constant_image() -> Result<(), TransformError> {
        let image = Image::from_size_val([6, 5].into(), RgbaF32(Vec4::splat(0.5)))?;
        let mut image_transformed = Image::from_size_default([6, 5].into())?;

        warp_affine(
            &image,
            &mut image_transformed,
            &Matrix::IDENTITY,
            &ResampleKernel::Bicubic,
            KernelAccumulation::Separable,
            ExecutionStrategy::Serial,
        )?;

        assert!(image_transformed
            .pixels()
            .all(|p| p.0.abs_diff_eq(Vec4::splat(0.5), 1e-5)));

        Ok(())
    }

    #[test]
    fn warp_affine_singular_matrix() -> Result<(), TransformError> {
        let image = Image::from_size_val([2, 2].into(), Gray8(3))?;
        let mut image_transformed = Image::from_size_val([2, 2].into(), Gray8(0))?;
        let singular = Matrix::from_scale(Vec2::new(0.0, 1.0));

        let res = warp_affine(
            &image,
            &mut image_transformed,
            &singular,
            &ResampleKernel::Nearest,
            KernelAccumulation::default(),
            ExecutionStrategy::Serial,
        );

        assert!(matches!(res, Err(TransformError::InvalidConfiguration(_))));
        assert!(image_transformed.pixels().all(|p| p == Gray8(0)));

        Ok(())
    }
}
