#![deny(missing_docs)]
//! Thin-plate spline (TPS) deformations.
//!
//! A TPS maps a set of control points onto a set of target points with a
//! smooth interpolant made of a radial basis part and an affine part. The
//! weights are solved once with [`solve`] and then applied to arbitrary
//! points with [`deform`] or to a whole sampling grid with [`deform_grid`].
//!
//! ```
//! use scrawl_tps::{deform, solve};
//!
//! let src = [[-1.0, -1.0], [1.0, -1.0], [-1.0, 1.0], [1.0, 1.0], [0.0, 0.0]];
//! let dst = [[-1.0, -1.0], [1.0, -1.0], [-1.0, 1.0], [1.0, 1.0], [0.1, 0.0]];
//!
//! let weights = solve(&src, &dst, 0.01).unwrap();
//! let warped = deform(&[[0.0, 0.0]], &src, &weights).unwrap();
//! assert!(warped[0][0] > 0.0);
//! ```

mod deform;
mod error;
mod rbf;
mod solve;

pub use deform::{deform, deform_grid};
pub use error::TpsError;
pub use rbf::{rbf, DEFAULT_EPS};
pub use solve::{solve, solve_with_config, TpsConfig, TpsWeights};
