use scrawl_tensor::TensorError;

/// An error type for the image and image processing crates.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the tensor cannot be created.
    #[error("Failed to create the underlying tensor. {0}")]
    TensorError(#[from] TensorError),

    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when two image sizes are expected to match.
    #[error("Invalid image size ({0}x{1}), expected ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when an image has no pixels.
    #[error("Image is empty ({0}x{1})")]
    EmptyImage(usize, usize),

    /// Error when a batch does not follow the (N, 1, H, W) layout.
    #[error("Invalid batch shape {0:?}, expected (N, 1, H, W) with non-zero dims")]
    InvalidBatchShape([usize; 4]),

    /// Error when indexing a batch past its end.
    #[error("Batch index {0} out of bounds for batch of size {1}")]
    BatchIndexOutOfBounds(usize, usize),

    /// Error when a sampling grid does not follow the (H, W, 2) layout.
    #[error("Invalid sampling grid shape {0:?}, expected (H, W, 2)")]
    InvalidGridShape([usize; 3]),

    /// Error when neither target height nor width were given to a resize.
    #[error("Resize requires a target height, a target width or both")]
    MissingResizeDimension,

    /// Error when a morphology kernel size is not a positive odd integer.
    #[error("Kernel size must be a positive odd integer, got {0}")]
    InvalidKernelSize(usize),

    /// Error when parsing an unknown morphology mode.
    #[error("Unknown morphology mode: {0}")]
    UnknownMorphologyMode(String),
}
