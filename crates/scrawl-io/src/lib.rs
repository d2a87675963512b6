#![deny(missing_docs)]
//! Reading and writing handwriting images.

/// Error types for the io module.
pub mod error;

/// PNG image encoding and decoding.
pub mod png;

pub use crate::error::IoError;
