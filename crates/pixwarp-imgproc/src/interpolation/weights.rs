use pixwarp_image::ImageError;

use super::resampler::Resampler;
use crate::error::TransformError;

/// A single source tap: the source index along one axis and its weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weight {
    /// Source index, always within `[0, source_extent - 1]`.
    pub index: i32,
    /// Contribution of the tap.
    pub value: f32,
}

/// The ordered taps contributing to one destination coordinate along one axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightsWindow {
    weights: Vec<Weight>,
}

impl WeightsWindow {
    /// Create a window from its taps.
    pub fn new(weights: Vec<Weight>) -> Self {
        Self { weights }
    }

    /// The taps of the window.
    pub fn weights(&self) -> &[Weight] {
        &self.weights
    }

    /// Iterate over the taps.
    pub fn iter(&self) -> std::slice::Iter<'_, Weight> {
        self.weights.iter()
    }

    /// The number of taps.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether the window has no taps.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// The sum of the tap weights.
    pub fn sum(&self) -> f32 {
        self.weights.iter().map(|w| w.value).sum()
    }
}

/// Per-axis table mapping every destination coordinate to its [`WeightsWindow`].
///
/// Built once per axis per transform and shared by every pixel on that
/// coordinate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightsTable {
    windows: Vec<WeightsWindow>,
}

impl WeightsTable {
    /// Compute the table for resampling `source_extent` pixels onto
    /// `destination_extent` pixels with `kernel`.
    ///
    /// When downscaling, the kernel is stretched by the scale ratio so every
    /// source pixel contributes. Taps are restricted to the source range and
    /// each window is normalized to sum to one when its raw sum is positive.
    /// Either extent being zero yields an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::AllocationFailed`] when the windows or their taps
    /// cannot be allocated.
    ///
    /// # Example
    ///
    /// ```
    /// use pixwarp_imgproc::interpolation::{ResampleKernel, WeightsTable};
    ///
    /// let table = WeightsTable::new(&ResampleKernel::Triangle, 4, 8).unwrap();
    /// assert_eq!(table.len(), 8);
    /// for window in table.windows() {
    ///     assert!((window.sum() - 1.0).abs() < 1e-5);
    /// }
    /// ```
    pub fn new<R: Resampler + ?Sized>(
        kernel: &R,
        source_extent: usize,
        destination_extent: usize,
    ) -> Result<Self, TransformError> {
        if source_extent == 0 || destination_extent == 0 {
            return Ok(Self::default());
        }

        let ratio = source_extent as f32 / destination_extent as f32;
        let scale = ratio.max(1.0);
        let radius = (scale * kernel.radius()).ceil();
        let last = (source_extent - 1) as f32;

        let mut windows = Vec::new();
        windows
            .try_reserve_exact(destination_extent)
            .map_err(|_| ImageError::AllocationFailed(destination_extent))?;

        for i in 0..destination_extent {
            let center = (i as f32 + 0.5) * ratio - 0.5;
            let left = (center - radius).ceil().max(0.0) as i32;
            let right = (center + radius).floor().min(last) as i32;

            let taps = usize::try_from(right - left + 1).unwrap_or(0);
            let mut weights = Vec::new();
            weights
                .try_reserve_exact(taps)
                .map_err(|_| ImageError::AllocationFailed(taps))?;

            weights.extend((left..=right).map(|j| Weight {
                index: j,
                value: kernel.weight((j as f32 - center) / scale),
            }));

            let sum = weights.iter().map(|w| w.value).sum::<f32>();
            if sum > 0.0 {
                weights.iter_mut().for_each(|w| w.value /= sum);
            }

            windows.push(WeightsWindow::new(weights));
        }

        Ok(Self { windows })
    }

    /// Build a table from precomputed windows.
    pub fn from_windows(windows: Vec<WeightsWindow>) -> Self {
        Self { windows }
    }

    /// The window for coordinate `i`, clamped to the last window so lookups
    /// never leave the table. `None` only for an empty table.
    #[inline]
    pub fn window(&self, i: usize) -> Option<&WeightsWindow> {
        self.windows.get(i.min(self.windows.len().saturating_sub(1)))
    }

    /// All windows in destination order.
    pub fn windows(&self) -> &[WeightsWindow] {
        &self.windows
    }

    /// The number of destination coordinates.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether the table has no windows.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
