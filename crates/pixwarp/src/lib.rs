#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use pixwarp_image as image;

#[doc(inline)]
pub use pixwarp_imgproc as imgproc;
