use std::f32::consts::PI;

/// A resampling kernel.
///
/// The kernel only has to answer "what weight does a source tap at continuous
/// offset `x` contribute"; [`crate::interpolation::WeightsTable`] turns that
/// into per-coordinate tap lists.
pub trait Resampler: Send + Sync + std::fmt::Debug {
    /// Half-width of the kernel support in source pixels at unit scale.
    fn radius(&self) -> f32;

    /// The kernel weight at offset `x`.
    fn weight(&self, x: f32) -> f32;

    /// Whether the kernel is nearest-neighbor. Nearest-neighbor sampling
    /// copies pixels directly and never builds weight tables.
    fn is_nearest(&self) -> bool {
        false
    }
}

/// The built-in resampling kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResampleKernel {
    /// Nearest-neighbor, exact pixel copies.
    Nearest,
    /// Linear tent filter.
    Triangle,
    /// Catmull-Rom cubic (`a = -0.5`).
    #[default]
    Bicubic,
    /// Lanczos windowed sinc with three lobes.
    Lanczos3,
}

#[inline]
fn sinc(x: f32) -> f32 {
    if x.abs() < f32::EPSILON {
        1.0
    } else {
        let pi_x = PI * x;
        pi_x.sin() / pi_x
    }
}

impl Resampler for ResampleKernel {
    fn radius(&self) -> f32 {
        match self {
            ResampleKernel::Nearest | ResampleKernel::Triangle => 1.0,
            ResampleKernel::Bicubic => 2.0,
            ResampleKernel::Lanczos3 => 3.0,
        }
    }

    fn weight(&self, x: f32) -> f32 {
        let x = x.abs();
        match self {
            ResampleKernel::Nearest => {
                if x < 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            ResampleKernel::Triangle => (1.0 - x).max(0.0),
            ResampleKernel::Bicubic => {
                if x <= 1.0 {
                    (1.5 * x - 2.5) * x * x + 1.0
                } else if x < 2.0 {
                    ((-0.5 * x + 2.5) * x - 4.0) * x + 2.0
                } else {
                    0.0
                }
            }
            ResampleKernel::Lanczos3 => {
                if x < 3.0 {
                    sinc(x) * sinc(x / 3.0)
                } else {
                    0.0
                }
            }
        }
    }

    fn is_nearest(&self) -> bool {
        matches!(self, ResampleKernel::Nearest)
    }
}
