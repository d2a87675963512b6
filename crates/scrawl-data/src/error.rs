use std::path::PathBuf;

/// An error type for the data module.
#[derive(thiserror::Error, Debug)]
pub enum DataError {
    /// Error reading or writing a file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to serialize the sample cache.
    #[error("Failed to encode the sample cache. {0}")]
    CacheEncodeError(#[from] bincode::error::EncodeError),

    /// Error to deserialize the sample cache.
    #[error("Failed to decode the sample cache. {0}")]
    CacheDecodeError(#[from] bincode::error::DecodeError),

    /// A manifest line is not `path<TAB>transcription`.
    #[error("Malformed manifest line {line} in {path}")]
    ManifestParseError {
        /// The manifest file.
        path: PathBuf,
        /// One-based line number.
        line: usize,
    },

    /// Unknown split name.
    #[error("Unknown split: {0}")]
    UnknownSplit(String),

    /// Unknown level name.
    #[error("Unknown level: {0}")]
    UnknownLevel(String),

    /// Error from an image operation.
    #[error(transparent)]
    ImageError(#[from] scrawl_image::ImageError),

    /// Error to decode an image file.
    #[error(transparent)]
    IoError(#[from] scrawl_io::IoError),

    /// Error to parse the dataset config.
    #[error("Failed to parse dataset config. {0}")]
    ConfigError(#[from] serde_json::Error),

    /// Sample index past the end of the dataset.
    #[error("Sample index {0} out of range for a dataset of {1} samples")]
    IndexOutOfRange(usize, usize),
}
