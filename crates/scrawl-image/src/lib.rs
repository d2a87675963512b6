#![deny(missing_docs)]
//! Image types and traits for generating and manipulating images

/// image representation for computer vision purposes.
pub mod image;

/// batched single-channel images laid out as (N, 1, H, W).
pub mod batch;

/// Error types for the image module.
pub mod error;

pub use crate::batch::ImageBatch;
pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
