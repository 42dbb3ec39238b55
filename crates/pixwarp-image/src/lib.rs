#![deny(missing_docs)]
//! Pixel formats, image buffers and scoped pixel accessors.

/// scoped read and write access to image pixels.
pub mod accessor;

/// Error types for the image module.
pub mod error;

/// image representation for geometric transforms.
pub mod image;

/// pixel encodings and the conversion contract they implement.
pub mod pixel;

pub use crate::accessor::{PixelAccessor, PixelAccessorMut};
pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
pub use crate::pixel::{Gray16, Gray8, Pixel, Rgb24, Rgba32, RgbaF32};

pub use glam::Vec4;
