//! Weighted resampling for geometric transforms.
//!
//! A [`Resampler`] answers "what weight does a source tap at continuous offset
//! `x` contribute". [`WeightsTable`] turns that answer into per-coordinate tap
//! lists, computed once per axis per transform and shared by every pixel on
//! that coordinate.

mod resampler;
mod weights;

pub use resampler::{ResampleKernel, Resampler};
pub use weights::{Weight, WeightsTable, WeightsWindow};
