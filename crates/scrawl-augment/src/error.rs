use scrawl_image::ImageError;

/// An error type for the augmentation pipeline.
#[derive(thiserror::Error, Debug)]
pub enum AugmentError {
    /// Error from an image operation.
    #[error(transparent)]
    ImageError(#[from] ImageError),

    /// The configuration holds an out of range value.
    #[error("Invalid augmentation config: {0}")]
    InvalidConfig(String),

    /// The configuration could not be parsed.
    #[error("Failed to parse augmentation config")]
    ParseConfig(#[from] serde_json::Error),
}
