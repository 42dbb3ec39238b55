use pixwarp_image::ImageError;

use crate::parallel::ParallelError;

/// Errors that can occur while transforming an image.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TransformError {
    /// The transform options are invalid. Raised before any buffer is allocated.
    #[error("invalid transform configuration: {0}")]
    InvalidConfiguration(String),

    /// An image level error, e.g. the destination buffer failed to allocate.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// The parallel row executor failed.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
