#![deny(missing_docs)]
//! Image processing operations for handwriting augmentation

/// image gradient filters.
pub mod filter;

/// utilities for interpolation and grid sampling.
pub mod interpolation;

/// morphological operators built on max pooling.
pub mod morphology;

/// operations to center and normalize images.
pub mod normalize;

/// module containing parallization utilities.
pub mod parallel;

/// utility functions for resizing images.
pub mod resize;

/// image geometric transformations module.
pub mod warp;
