//! Pixel interpolation methods for image transformations.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: uses the nearest pixel value
//! - **Bilinear**: linear interpolation between the four adjacent pixels
//!
//! Every kernel works on a single row-major plane and clamps coordinates to
//! the plane borders, so out-of-range samples replicate the edge pixels.

mod bilinear;

/// Normalized sampling grids and [`grid_sample`].
pub mod grid;

pub(crate) mod interpolate;
mod nearest;

pub use grid::{grid_sample, GridPadding};
pub use interpolate::{interpolate_pixel, InterpolationMode};
