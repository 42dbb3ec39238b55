#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// error types of the transform pipeline.
pub mod error;

/// image flipping module.
pub mod flip;

/// integer rectangles, points and the affine matrix type.
pub mod geometry;

/// utilities for interpolation and resampling.
pub mod interpolation;

/// module containing parallization utilities.
pub mod parallel;

/// image geometric transformations module.
pub mod warp;

pub use error::TransformError;
