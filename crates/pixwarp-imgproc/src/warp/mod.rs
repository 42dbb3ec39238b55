//! Geometric image transformations.
//!
//! - [`RotateProcessor`]: rotation about the image center, with an exact
//!   index-remapping path for right angles and a weighted resampling path
//!   for everything else.
//! - [`warp_affine`]: a user supplied forward matrix onto a user sized
//!   destination, sampled by the same row loop as the rotation.
//! - Matrix helpers for canvas computation and centering.
//!
//! # Examples
//!
//! Rotating an image by 30 degrees with a bicubic kernel:
//!
//! ```
//! use pixwarp_image::{Image, Rgba32};
//! use pixwarp_imgproc::interpolation::ResampleKernel;
//! use pixwarp_imgproc::warp::rotate;
//!
//! let mut image = Image::from_size_val([64, 32].into(), Rgba32::new(255, 0, 0, 255)).unwrap();
//! rotate(&mut image, 30.0, ResampleKernel::Bicubic).unwrap();
//!
//! assert_eq!(image.size(), [72, 60].into());
//! ```

mod affine;
mod compose;
mod orient;
mod resample;
mod rotate;

pub use affine::warp_affine;
pub use compose::{bounding_rectangle, centered_matrix, compute_canvas};
pub use orient::{rotate_right_angle, RightAngle, ANGLE_EPSILON};
pub use resample::{sample_weighted, AxisWeights, KernelAccumulation};
pub use rotate::{
    rotate, RotateOptions, RotatePath, RotatePlan, RotateProcessor, MAX_RESIZE_EXTENT,
};
