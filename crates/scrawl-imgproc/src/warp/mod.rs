//! Geometric image transformations driven by sampling grids.
//!
//! # Examples
//!
//! Slanting a word image to the right:
//!
//! ```no_run
//! use scrawl_image::ImageBatch;
//! use scrawl_imgproc::warp::{warp_affine_grid, AffineParams};
//!
//! let src = ImageBatch::from_size_val(1, [128, 32].into(), 0.0).unwrap();
//! let params = AffineParams { rotation: 0.0, slant: 0.5 };
//! let dst = warp_affine_grid(&src, &params, 40.0).unwrap();
//! ```

mod affine;

pub use affine::{affine_grid, rotation_matrix, warp_affine_grid, AffineParams};
