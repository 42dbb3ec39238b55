use pixwarp_image::{Image, Pixel};

use crate::error::TransformError;
use crate::parallel::{par_iter_rows_indexed, ExecutionStrategy};

/// Tolerance, in degrees, for treating an angle as a multiple of 90.
pub const ANGLE_EPSILON: f32 = 0.0001;

/// An axis-aligned rotation that is handled by exact index remapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RightAngle {
    /// No rotation, the image is left untouched.
    Identity,
    /// A quarter turn clockwise.
    Rotate90,
    /// A half turn.
    Rotate180,
    /// Three quarter turns clockwise.
    Rotate270,
}

impl RightAngle {
    /// Classify `degrees`, normalized into `[0, 360)`, as a right angle when it
    /// is within [`ANGLE_EPSILON`] of a multiple of 90.
    ///
    /// # Example
    ///
    /// ```
    /// use pixwarp_imgproc::warp::RightAngle;
    ///
    /// assert_eq!(RightAngle::classify(-90.0), Some(RightAngle::Rotate270));
    /// assert_eq!(RightAngle::classify(359.99995), Some(RightAngle::Identity));
    /// assert_eq!(RightAngle::classify(45.0), None);
    /// ```
    pub fn classify(degrees: f32) -> Option<Self> {
        let a = degrees.rem_euclid(360.0);
        let near = |target: f32| (a - target).abs() < ANGLE_EPSILON;

        if near(0.0) || near(360.0) {
            Some(RightAngle::Identity)
        } else if near(90.0) {
            Some(RightAngle::Rotate90)
        } else if near(180.0) {
            Some(RightAngle::Rotate180)
        } else if near(270.0) {
            Some(RightAngle::Rotate270)
        } else {
            None
        }
    }

    /// Whether the rotation exchanges width and height.
    pub fn swaps_axes(&self) -> bool {
        matches!(self, RightAngle::Rotate90 | RightAngle::Rotate270)
    }
}

/// Rotate `src` by a right angle through exact index remapping.
///
/// Destination pixel `(x, y)` is gathered from:
///
/// - `Rotate90`:  `src(y, height - x - 1)`, i.e. `src(x, y)` lands on `(height - y - 1, x)`
/// - `Rotate180`: `src(width - x - 1, height - y - 1)`
/// - `Rotate270`: `src(width - y - 1, x)`, i.e. `src(x, y)` lands on `(y, width - x - 1)`
///
/// No resampling is involved. `Identity` returns a copy.
pub fn rotate_right_angle<P: Pixel>(
    src: &Image<P>,
    rotation: RightAngle,
    strategy: ExecutionStrategy,
) -> Result<Image<P>, TransformError> {
    if rotation == RightAngle::Identity {
        return Ok(src.clone());
    }

    let (width, height) = (src.width(), src.height());
    let dst_size = if rotation.swaps_axes() {
        src.size().transposed()
    } else {
        src.size()
    };

    let mut dst = Image::from_size_default(dst_size)?;
    let source = src.lock();
    let data = source.as_slice();

    par_iter_rows_indexed(&mut dst.lock_mut(), strategy, |y, row| {
        for (x, out) in row.iter_mut().enumerate() {
            let (sx, sy) = match rotation {
                RightAngle::Rotate90 => (y, height - x - 1),
                RightAngle::Rotate180 => (width - x - 1, height - y - 1),
                RightAngle::Rotate270 => (width - y - 1, x),
                RightAngle::Identity => (x, y),
            };
            *out = data[sy * width + sx];
        }
    })?;

    Ok(dst)
}
