use glam::Vec4;
use pixwarp_image::{Image, ImageSize, Pixel, PixelAccessor};

use crate::error::TransformError;
use crate::geometry::{Matrix, Point, Rectangle};
use crate::interpolation::{Resampler, WeightsTable};
use crate::parallel::{par_iter_rows_indexed, ExecutionStrategy};

/// How the horizontal and vertical taps of a continuous kernel are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KernelAccumulation {
    /// Sum the horizontal taps along the sampled row and the vertical taps
    /// along the sampled column independently, then average the two sums.
    ///
    /// This is not a 2D convolution: only the cross through the sampled pixel
    /// contributes. It is the default for output compatibility.
    #[default]
    AxisAverage,
    /// Full separable 2D convolution over the product of both windows.
    Separable,
}

/// The horizontal and vertical weight tables of one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisWeights {
    /// Windows indexed by source column.
    pub horizontal: WeightsTable,
    /// Windows indexed by source row.
    pub vertical: WeightsTable,
}

impl AxisWeights {
    /// Build both tables for sampling a `source` sized image towards `target`.
    ///
    /// Windows are looked up by source coordinate, so each table has at least
    /// one window per source pixel along its axis: the destination extent is
    /// `max(target, source)`.
    ///
    /// # Errors
    ///
    /// Fails when a table cannot be allocated.
    pub fn new<R: Resampler + ?Sized>(
        resampler: &R,
        source: ImageSize,
        target: ImageSize,
    ) -> Result<Self, TransformError> {
        Ok(Self {
            horizontal: WeightsTable::new(
                resampler,
                source.width,
                target.width.max(source.width),
            )?,
            vertical: WeightsTable::new(
                resampler,
                source.height,
                target.height.max(source.height),
            )?,
        })
    }
}

/// Resample the source at integer position `(x, y)` with the windows of that
/// column and row.
///
/// Returns `None` when either table is empty.
pub fn sample_weighted<P: Pixel>(
    source: &PixelAccessor<'_, P>,
    weights: &AxisWeights,
    x: i32,
    y: i32,
    accumulation: KernelAccumulation,
) -> Option<P> {
    let horizontal = weights.horizontal.window(x.max(0) as usize)?;
    let vertical = weights.vertical.window(y.max(0) as usize)?;
    let at = |tx: i32, ty: i32| {
        source
            .get_clamped(tx as i64, ty as i64)
            .map_or(Vec4::ZERO, P::to_vector4)
    };

    let value = match accumulation {
        KernelAccumulation::AxisAverage => {
            let h = horizontal
                .iter()
                .fold(Vec4::ZERO, |sum, w| sum + at(w.index, y) * w.value);
            let v = vertical
                .iter()
                .fold(Vec4::ZERO, |sum, w| sum + at(x, w.index) * w.value);
            (h + v) / 2.0
        }
        KernelAccumulation::Separable => vertical.iter().fold(Vec4::ZERO, |sum, wy| {
            let row = horizontal
                .iter()
                .fold(Vec4::ZERO, |acc, wx| acc + at(wx.index, wy.index) * wx.value);
            sum + row * wy.value
        }),
    };

    Some(P::from_vector4(value))
}

/// Fill `dst` by mapping every destination pixel through `matrix` into `src`.
///
/// `matrix` maps destination coordinates to source coordinates. The mapped
/// point is truncated toward zero; points outside the source leave the
/// destination pixel untouched. Without weights the source pixel is copied,
/// otherwise it is resampled with [`sample_weighted`].
pub(crate) fn resample_rows<P: Pixel>(
    src: &Image<P>,
    dst: &mut Image<P>,
    matrix: &Matrix,
    weights: Option<&AxisWeights>,
    accumulation: KernelAccumulation,
    strategy: ExecutionStrategy,
) -> Result<(), TransformError> {
    let source = src.lock();
    let bounds = Rectangle::from_size(src.size());

    par_iter_rows_indexed(&mut dst.lock_mut(), strategy, |y, row| {
        for (x, out) in row.iter_mut().enumerate() {
            let (sx, sy) = Point::new(x as f32, y as f32).rotate(matrix).to_i32();

            if !bounds.contains(sx, sy) {
                continue;
            }

            let pixel = match weights {
                None => source.get(sx as usize, sy as usize),
                Some(weights) => sample_weighted(&source, weights, sx, sy, accumulation),
            };

            if let Some(pixel) = pixel {
                *out = pixel;
            }
        }
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolation::{ResampleKernel, Weight, WeightsWindow};
    use pixwarp_image::{Gray8, RgbaF32};

    fn window(taps: &[(i32, f32)]) -> WeightsWindow {
        WeightsWindow::new(
            taps.iter()
                .map(|&(index, value)| Weight { index, value })
                .collect(),
        )
    }

    fn gray(v: f32) -> RgbaF32 {
        RgbaF32(Vec4::new(v, v, v, 1.0))
    }

    #[test]
    fn axis_weights_cover_every_source_coordinate() -> Result<(), TransformError> {
        let weights = AxisWeights::new(&ResampleKernel::Bicubic, [100, 4].into(), [22, 100].into())?;
        assert_eq!(weights.horizontal.len(), 100);
        assert_eq!(weights.vertical.len(), 100);
        Ok(())
    }

    #[test]
    fn sample_axis_average_vs_separable() -> Result<(), TransformError> {
        // a b
        // c d
        let image = Image::new(
            [2, 2].into(),
            vec![gray(0.0), gray(0.4), gray(0.8), gray(0.4)],
        )?;
        let half = window(&[(0, 0.5), (1, 0.5)]);
        let weights = AxisWeights {
            horizontal: WeightsTable::from_windows(vec![half.clone()]),
            vertical: WeightsTable::from_windows(vec![half]),
        };
        let source = image.lock();

        // (h + v) / 2 = ((a + b) / 2 + (a + c) / 2) / 2
        let avg = sample_weighted(&source, &weights, 0, 0, KernelAccumulation::AxisAverage);
        // (a + b + c + d) / 4
        let sep = sample_weighted(&source, &weights, 0, 0, KernelAccumulation::Separable);

        let avg = avg.map(|p| p.0.x).unwrap_or_default();
        let sep = sep.map(|p| p.0.x).unwrap_or_default();
        assert!((avg - 0.3).abs() < 1e-6);
        assert!((sep - 0.4).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn sample_with_empty_table() -> Result<(), TransformError> {
        let image = Image::new([1, 1].into(), vec![gray(1.0)])?;
        let weights = AxisWeights {
            horizontal: WeightsTable::default(),
            vertical: WeightsTable::from_windows(vec![window(&[(0, 1.0)])]),
        };
        let pixel = sample_weighted(&image.lock(), &weights, 0, 0, KernelAccumulation::AxisAverage);
        assert_eq!(pixel, None);
        Ok(())
    }

    #[test]
    fn resample_rows_keeps_unmapped_pixels() -> Result<(), TransformError> {
        let src = Image::from_size_val([2, 2].into(), Gray8(9))?;
        let mut dst = Image::from_size_val([3, 1].into(), Gray8(1))?;
        let shift = Matrix::from_translation(glam::Vec2::new(1.0, 0.0));

        resample_rows(
            &src,
            &mut dst,
            &shift,
            None,
            KernelAccumulation::default(),
            ExecutionStrategy::Serial,
        )?;

        // x = 2 maps to source column 3, outside the source
        assert_eq!(dst.as_slice(), &[Gray8(9), Gray8(9), Gray8(1)]);
        Ok(())
    }
}
