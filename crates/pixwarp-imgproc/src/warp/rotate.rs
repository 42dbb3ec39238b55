use pixwarp_image::{Image, ImageSize, Pixel};

use crate::error::TransformError;
use crate::geometry::{Matrix, Point, Rectangle};
use crate::interpolation::{ResampleKernel, Resampler};
use crate::parallel::ExecutionStrategy;

use super::compose::{centered_matrix, compute_canvas};
use super::orient::{rotate_right_angle, RightAngle};
use super::resample::{resample_rows, AxisWeights, KernelAccumulation};

/// Largest accepted resize rectangle extent, unless the source is larger.
pub const MAX_RESIZE_EXTENT: usize = 1 << 16;

/// Options for [`RotateProcessor`].
#[derive(Debug, Clone, PartialEq)]
pub struct RotateOptions<R = ResampleKernel> {
    /// Rotation in degrees, clockwise in image coordinates. Any finite value.
    pub angle: f32,
    /// Grow the canvas to hold the whole rotated image instead of clipping
    /// to the source bounds.
    pub expand: bool,
    /// The sampling kernel.
    ///
    /// Only [`ResampleKernel::Nearest`] copies source pixels unchanged.
    /// Continuous kernels blend neighbors, so small images or hard color
    /// edges come out with mixed colors.
    pub resampler: R,
    /// Target bounds the weight tables are derived for. Defaults to the source
    /// bounds, and is replaced by the canvas when `expand` is set.
    pub resize_rectangle: Option<Rectangle>,
    /// How destination rows are scheduled.
    pub strategy: ExecutionStrategy,
    /// How continuous kernel taps are combined.
    pub accumulation: KernelAccumulation,
}

impl Default for RotateOptions<ResampleKernel> {
    fn default() -> Self {
        Self {
            angle: 0.0,
            expand: true,
            resampler: ResampleKernel::default(),
            resize_rectangle: None,
            strategy: ExecutionStrategy::default(),
            accumulation: KernelAccumulation::default(),
        }
    }
}

impl<R> RotateOptions<R> {
    /// Set the rotation angle in degrees.
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    /// Set whether the canvas grows to fit the rotated image.
    pub fn with_expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    /// Set the sampling kernel.
    pub fn with_resampler<R2>(self, resampler: R2) -> RotateOptions<R2> {
        RotateOptions {
            angle: self.angle,
            expand: self.expand,
            resampler,
            resize_rectangle: self.resize_rectangle,
            strategy: self.strategy,
            accumulation: self.accumulation,
        }
    }

    /// Set the rectangle the weight tables are derived for.
    pub fn with_resize_rectangle(mut self, rect: Rectangle) -> Self {
        self.resize_rectangle = Some(rect);
        self
    }

    /// Set the row scheduling strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set how continuous kernel taps are combined.
    pub fn with_accumulation(mut self, accumulation: KernelAccumulation) -> Self {
        self.accumulation = accumulation;
        self
    }
}

/// Which path a rotation takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotatePath {
    /// Exact index remapping for an axis-aligned angle.
    RightAngle(RightAngle),
    /// Inverse mapping through the centered matrix.
    General,
}

/// Everything decided before pixels are touched.
#[derive(Debug, Clone, PartialEq)]
pub struct RotatePlan {
    /// The selected path.
    pub path: RotatePath,
    /// The destination bounds.
    pub canvas: Rectangle,
    /// The bounds the weight tables were derived for.
    pub resize_rectangle: Rectangle,
    /// Destination to source mapping. `None` on the right angle path.
    pub matrix: Option<Matrix>,
    /// Weight tables. Only built for continuous kernels on the general path.
    pub weights: Option<AxisWeights>,
}

/// Rotates images in place.
///
/// # Example
///
/// ```
/// use pixwarp_image::{Gray8, Image};
/// use pixwarp_imgproc::interpolation::ResampleKernel;
/// use pixwarp_imgproc::warp::{RotateOptions, RotateProcessor};
///
/// let mut image = Image::from_fn([4, 2].into(), |x, y| Gray8((y * 4 + x) as u8)).unwrap();
///
/// let options = RotateOptions::default()
///     .with_angle(90.0)
///     .with_resampler(ResampleKernel::Nearest);
/// RotateProcessor::new(options).apply(&mut image).unwrap();
///
/// assert_eq!(image.size(), [2, 4].into());
/// ```
#[derive(Debug, Clone)]
pub struct RotateProcessor<R = ResampleKernel> {
    options: RotateOptions<R>,
}

impl<R: Resampler> RotateProcessor<R> {
    /// Create a processor with the given options.
    pub fn new(options: RotateOptions<R>) -> Self {
        Self { options }
    }

    /// The options of the processor.
    pub fn options(&self) -> &RotateOptions<R> {
        &self.options
    }

    /// Validate the options and plan the rotation of an image of `source` size.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidConfiguration`] for a non-finite angle,
    /// or for a resize rectangle with negative extents or extents above
    /// [`MAX_RESIZE_EXTENT`] and the source size. Allocation of the weight
    /// tables may also fail.
    pub fn before_apply(&self, source: ImageSize) -> Result<RotatePlan, TransformError> {
        let options = &self.options;

        if !options.angle.is_finite() {
            return Err(TransformError::InvalidConfiguration(format!(
                "angle must be finite, got {}",
                options.angle
            )));
        }

        if let Some(rect) = options.resize_rectangle {
            let size = rect.to_size().ok_or_else(|| {
                TransformError::InvalidConfiguration(format!(
                    "resize rectangle has negative extent: {rect:?}"
                ))
            })?;
            let max_width = MAX_RESIZE_EXTENT.max(source.width);
            let max_height = MAX_RESIZE_EXTENT.max(source.height);
            if size.width > max_width || size.height > max_height {
                return Err(TransformError::InvalidConfiguration(format!(
                    "resize rectangle {size} exceeds {max_width}x{max_height}"
                )));
            }
        }

        let source_rect = Rectangle::from_size(source);

        if let Some(rotation) = RightAngle::classify(options.angle) {
            let canvas = if rotation.swaps_axes() {
                Rectangle::from_size(source.transposed())
            } else {
                source_rect
            };
            log::debug!("rotate {}: right angle path {rotation:?}", options.angle);
            return Ok(RotatePlan {
                path: RotatePath::RightAngle(rotation),
                canvas,
                resize_rectangle: options.resize_rectangle.unwrap_or(canvas),
                matrix: None,
                weights: None,
            });
        }

        // the process matrix maps destination offsets back into the source
        let process = Point::create_rotation(Point::ZERO, -options.angle);

        let (canvas, resize_rectangle) = if options.expand {
            let canvas = compute_canvas(&source_rect, &process);
            (canvas, canvas)
        } else {
            (
                source_rect,
                options.resize_rectangle.unwrap_or(source_rect),
            )
        };

        let matrix = centered_matrix(&source_rect, &canvas, &process);

        let weights = if options.resampler.is_nearest() {
            None
        } else {
            let target = resize_rectangle.to_size().unwrap_or_default();
            let weights = AxisWeights::new(&options.resampler, source, target)?;
            log::trace!(
                "weight tables: {} horizontal, {} vertical windows",
                weights.horizontal.len(),
                weights.vertical.len()
            );
            Some(weights)
        };

        log::debug!(
            "rotate {}: general path, {source} -> canvas {}x{}, resampler {:?}",
            options.angle,
            canvas.width,
            canvas.height,
            options.resampler
        );

        Ok(RotatePlan {
            path: RotatePath::General,
            canvas,
            resize_rectangle,
            matrix: Some(matrix),
            weights,
        })
    }

    /// Rotate `image` in place.
    ///
    /// The result is computed into a separate buffer and swapped in only once
    /// complete; on error `image` is left untouched.
    ///
    /// # Errors
    ///
    /// Configuration errors are reported before any allocation. Allocation of
    /// the destination and thread pool creation may also fail.
    pub fn apply<P: Pixel>(&self, image: &mut Image<P>) -> Result<(), TransformError> {
        let plan = self.before_apply(image.size())?;

        let rotated = match plan.path {
            RotatePath::RightAngle(RightAngle::Identity) => return Ok(()),
            RotatePath::RightAngle(rotation) => {
                rotate_right_angle(image, rotation, self.options.strategy)?
            }
            RotatePath::General => self.apply_general(image, &plan)?,
        };

        image.replace_with(rotated);

        Ok(())
    }

    fn apply_general<P: Pixel>(
        &self,
        src: &Image<P>,
        plan: &RotatePlan,
    ) -> Result<Image<P>, TransformError> {
        let canvas = plan.canvas.to_size().ok_or_else(|| {
            TransformError::InvalidConfiguration(format!("invalid canvas {:?}", plan.canvas))
        })?;
        let matrix = plan.matrix.unwrap_or(Matrix::IDENTITY);

        let mut dst = Image::from_size_default(canvas)?;
        resample_rows(
            src,
            &mut dst,
            &matrix,
            plan.weights.as_ref(),
            self.options.accumulation,
            self.options.strategy,
        )?;

        Ok(dst)
    }
}

/// Rotate `image` in place by `angle` degrees with an expanding canvas.
///
/// Pass [`ResampleKernel::Nearest`] to keep the exact source colors; the
/// continuous kernels blend neighboring pixels.
pub fn rotate<P: Pixel>(
    image: &mut Image<P>,
    angle: f32,
    resampler: ResampleKernel,
) -> Result<(), TransformError> {
    let options = RotateOptions::default()
        .with_angle(angle)
        .with_resampler(resampler);
    RotateProcessor::new(options).apply(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixwarp_image::Gray8;

    #[test]
    fn plan_right_angle() -> Result<(), TransformError> {
        let processor = RotateProcessor::new(RotateOptions::default().with_angle(-90.0));
        let plan = processor.before_apply([4, 2].into())?;
        assert_eq!(plan.path, RotatePath::RightAngle(RightAngle::Rotate270));
        assert_eq!(plan.canvas, Rectangle::new(0, 0, 2, 4));
        assert!(plan.matrix.is_none());
        assert!(plan.weights.is_none());
        Ok(())
    }

    #[test]
    fn plan_expand_adopts_canvas() -> Result<(), TransformError> {
        let options = RotateOptions::default()
            .with_angle(45.0)
            .with_resize_rectangle(Rectangle::new(0, 0, 3, 3));
        let plan = RotateProcessor::new(options).before_apply([10, 10].into())?;
        assert_eq!(plan.path, RotatePath::General);
        assert_eq!(plan.canvas, Rectangle::new(0, 0, 15, 15));
        assert_eq!(plan.resize_rectangle, plan.canvas);

        let weights = plan.weights.ok_or_else(|| {
            TransformError::InvalidConfiguration("missing weights".to_string())
        })?;
        assert_eq!(weights.horizontal.len(), 15);
        assert_eq!(weights.vertical.len(), 15);
        Ok(())
    }

    #[test]
    fn plan_tables_cover_source() -> Result<(), TransformError> {
        let options = RotateOptions::default()
            .with_angle(30.0)
            .with_expand(false)
            .with_resize_rectangle(Rectangle::new(0, 0, 5, 6));
        let plan = RotateProcessor::new(options).before_apply([8, 4].into())?;
        assert_eq!(plan.canvas, Rectangle::new(0, 0, 8, 4));
        assert_eq!(plan.resize_rectangle, Rectangle::new(0, 0, 5, 6));
        let weights = plan.weights.ok_or_else(|| {
            TransformError::InvalidConfiguration("missing weights".to_string())
        })?;
        assert_eq!(weights.horizontal.len(), 8);
        assert_eq!(weights.vertical.len(), 6);
        Ok(())
    }

    #[test]
    fn plan_nearest_skips_weights() -> Result<(), TransformError> {
        let options = RotateOptions::default()
            .with_angle(12.5)
            .with_resampler(ResampleKernel::Nearest);
        let plan = RotateProcessor::new(options).before_apply([16, 9].into())?;
        assert_eq!(plan.path, RotatePath::General);
        assert!(plan.weights.is_none());
        Ok(())
    }

    #[test]
    fn plan_rejects_oversized_resize_rectangle() {
        let options = RotateOptions::default()
            .with_angle(10.0)
            .with_expand(false)
            .with_resize_rectangle(Rectangle::new(0, 0, i32::MAX, i32::MAX));
        let res = RotateProcessor::new(options).before_apply([8, 8].into());
        assert!(matches!(res, Err(TransformError::InvalidConfiguration(_))));

        // a rectangle as large as the source is always accepted
        let wide = MAX_RESIZE_EXTENT + 1;
        let options = RotateOptions::default()
            .with_angle(10.0)
            .with_expand(false)
            .with_resampler(ResampleKernel::Nearest)
            .with_resize_rectangle(Rectangle::new(0, 0, wide as i32, 1));
        let res = RotateProcessor::new(options).before_apply([wide, 1].into());
        assert!(res.is_ok());
    }

    #[test]
    fn invalid_configuration_leaves_image() -> Result<(), TransformError> {
        let mut image = Image::from_fn([3, 3].into(), |x, y| Gray8((x + y) as u8))?;
        let before = image.clone();

        let options = RotateOptions::default()
            .with_angle(20.0)
            .with_resize_rectangle(Rectangle::new(0, 0, -3, 3));
        let res = RotateProcessor::new(options).apply(&mut image);
        assert!(matches!(res, Err(TransformError::InvalidConfiguration(_))));

        let options = RotateOptions::default().with_angle(f32::NAN);
        let res = RotateProcessor::new(options).apply(&mut image);
        assert!(matches!(res, Err(TransformError::InvalidConfiguration(_))));

        let options = RotateOptions::default()
            .with_angle(20.0)
            .with_strategy(ExecutionStrategy::Fixed(0));
        let res = RotateProcessor::new(options).apply(&mut image);
        assert!(matches!(res, Err(TransformError::Parallel(_))));

        assert_eq!(image, before);
        Ok(())
    }
}
