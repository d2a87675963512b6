use faer::prelude::*;
use faer::Mat;
use serde::{Deserialize, Serialize};

use scrawl_tensor::Tensor2;

use crate::error::TpsError;
use crate::rbf::{kernel, squared_distance, DEFAULT_EPS};

/// Relative tolerance on the residual of the solved system.
const RESIDUAL_TOLERANCE: f64 = 1e-6;

/// Constants of the thin-plate spline system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TpsConfig {
    /// Smoothing added to the diagonal of the radial basis block.
    pub lambda: f32,
    /// Ridge added to the diagonal of the whole system before solving.
    pub regularization: f32,
}

impl Default for TpsConfig {
    fn default() -> Self {
        Self {
            lambda: 0.01,
            regularization: 0.1,
        }
    }
}

/// Solved thin-plate spline weights.
///
/// The matrix has shape (n + D + 1, D + 1): the first n rows weight the radial basis
/// of each control point, the next D rows the coordinates and the last row the constant
/// term. The last column is the homogeneous output and is dropped by `deform`.
#[derive(Debug, Clone, PartialEq)]
pub struct TpsWeights<const D: usize> {
    weights: Tensor2<f32>,
}

impl<const D: usize> TpsWeights<D> {
    /// Number of control points the weights were solved for.
    pub fn num_control_points(&self) -> usize {
        self.weights.shape[0] - D - 1
    }

    /// The raw weight matrix.
    pub fn as_tensor(&self) -> &Tensor2<f32> {
        &self.weights
    }

    #[inline]
    pub(crate) fn at(&self, row: usize, col: usize) -> f32 {
        self.weights.as_slice()[row * (D + 1) + col]
    }
}

fn check_finite<const D: usize>(points: &[[f32; D]]) -> Result<(), TpsError> {
    match points.iter().position(|p| p.iter().any(|v| !v.is_finite())) {
        Some(i) => Err(TpsError::NonFinitePoint(i)),
        None => Ok(()),
    }
}

/// Solve `m * x = rhs` with a partial pivoting LU and reject unreliable solutions.
pub(crate) fn lu_solve(m: &Mat<f64>, rhs: &Mat<f64>) -> Result<Mat<f64>, TpsError> {
    let x = m.partial_piv_lu().solve(rhs);

    let mut max_x = 0.0f64;
    for j in 0..x.ncols() {
        for i in 0..x.nrows() {
            let v = x.read(i, j);
            if !v.is_finite() {
                return Err(TpsError::SingularSystem);
            }
            max_x = max_x.max(v.abs());
        }
    }

    let mut max_m = 0.0f64;
    for j in 0..m.ncols() {
        for i in 0..m.nrows() {
            max_m = max_m.max(m.read(i, j).abs());
        }
    }

    let tolerance = RESIDUAL_TOLERANCE * (1.0 + max_m * max_x);
    for j in 0..rhs.ncols() {
        for i in 0..m.nrows() {
            let mut acc = 0.0;
            for k in 0..m.ncols() {
                acc += m.read(i, k) * x.read(k, j);
            }
            let residual = (acc - rhs.read(i, j)).abs();
            if residual > tolerance {
                return Err(TpsError::SingularSystem);
            }
        }
    }

    Ok(x)
}

/// Solve the thin-plate spline mapping `src` onto `dst` with the default regularization.
///
/// # Arguments
///
/// * `src` - The n control points.
/// * `dst` - The n target points, in the same order.
/// * `lambda` - The smoothing added to the radial basis block.
///
/// # Errors
///
/// * [`TpsError::PointCountMismatch`] if the point sets differ in size.
/// * [`TpsError::EmptyPointSet`] if there are no points.
/// * [`TpsError::NonFinitePoint`] if a coordinate is NaN or infinite.
/// * [`TpsError::SingularSystem`] if the system cannot be solved reliably.
pub fn solve<const D: usize>(
    src: &[[f32; D]],
    dst: &[[f32; D]],
    lambda: f32,
) -> Result<TpsWeights<D>, TpsError> {
    let config = TpsConfig {
        lambda,
        ..Default::default()
    };
    solve_with_config(src, dst, &config)
}

/// Solve the thin-plate spline mapping `src` onto `dst`.
///
/// Builds `A = rbf(src, src) + lambda * I`, the system `M = [[A, Xa], [Xa^T, 0]]` with
/// `Xa = [src | 1]`, the right hand side `Ya = [[dst | 1]; 0]` and solves
/// `(M + regularization * I) W = Ya` with a dense LU decomposition.
///
/// See [`solve`] for the error conditions.
pub fn solve_with_config<const D: usize>(
    src: &[[f32; D]],
    dst: &[[f32; D]],
    config: &TpsConfig,
) -> Result<TpsWeights<D>, TpsError> {
    if src.len() != dst.len() {
        return Err(TpsError::PointCountMismatch(src.len(), dst.len()));
    }
    if src.is_empty() {
        return Err(TpsError::EmptyPointSet);
    }
    check_finite(src)?;
    check_finite(dst)?;

    let n = src.len();
    let size = n + D + 1;
    let eps = DEFAULT_EPS as f64;
    let (lambda, regularization) = (config.lambda as f64, config.regularization as f64);

    log::debug!("solving a {size}x{size} thin-plate spline system");

    // homogeneous coordinate of a control point
    let affine = |i: usize, k: usize| -> f64 {
        if k < D {
            src[i][k] as f64
        } else {
            1.0
        }
    };

    let m = Mat::<f64>::from_fn(size, size, |i, j| {
        let value = match (i < n, j < n) {
            (true, true) if i == j => lambda,
            (true, true) => kernel(squared_distance(&src[i], &src[j]), eps),
            (true, false) => affine(i, j - n),
            (false, true) => affine(j, i - n),
            (false, false) => 0.0,
        };
        if i == j {
            value + regularization
        } else {
            value
        }
    });

    let rhs = Mat::<f64>::from_fn(size, D + 1, |i, k| match (i < n, k < D) {
        (true, true) => dst[i][k] as f64,
        (true, false) => 1.0,
        (false, _) => 0.0,
    });

    let x = lu_solve(&m, &rhs)?;

    let weights = Tensor2::from_shape_fn([size, D + 1], |[i, k]| x.read(i, k) as f32);

    Ok(TpsWeights { weights })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_shape() -> Result<(), TpsError> {
        let points = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
        let weights = solve(&points, &points, 0.01)?;
        assert_eq!(weights.as_tensor().shape, [7, 3]);
        assert_eq!(weights.num_control_points(), 4);
        assert!(weights.as_tensor().iter().all(|v| v.is_finite()));
        Ok(())
    }

    #[test]
    fn invalid_point_sets() {
        let a = [[0.0, 0.0], [1.0, 0.0]];
        let b = [[0.0, 0.0]];
        assert_eq!(solve(&a, &b, 0.01), Err(TpsError::PointCountMismatch(2, 1)));

        let empty: [[f32; 2]; 0] = [];
        assert_eq!(solve(&empty, &empty, 0.01), Err(TpsError::EmptyPointSet));

        let nan = [[0.0, 0.0], [f32::NAN, 1.0]];
        assert_eq!(solve(&a, &nan, 0.01), Err(TpsError::NonFinitePoint(1)));
    }

    #[test]
    fn singular_system() {
        // rank one
        let m = Mat::<f64>::from_fn(2, 2, |i, j| ((i + 1) * (j + 1)) as f64);
        let rhs = Mat::<f64>::from_fn(2, 1, |i, _| if i == 0 { 1.0 } else { 0.0 });
        assert!(matches!(lu_solve(&m, &rhs), Err(TpsError::SingularSystem)));
    }

    #[test]
    fn duplicated_points_without_regularization() {
        let config = TpsConfig {
            lambda: 0.0,
            regularization: 0.0,
        };
        // same control point sent to two different targets
        let src = [[0.0, 0.0], [0.0, 0.0]];
        let dst = [[0.0, 0.0], [1.0, 1.0]];
        assert_eq!(
            solve_with_config(&src, &dst, &config),
            Err(TpsError::SingularSystem)
        );

        // the default regularization keeps the same points solvable
        assert!(solve(&src, &src, 0.01).is_ok());
    }

    #[test]
    fn well_posed_system() -> Result<(), TpsError> {
        let m = Mat::<f64>::from_fn(2, 2, |i, j| if i == j { 2.0 } else { 1.0 });
        let rhs = Mat::<f64>::from_fn(2, 1, |_, _| 3.0);
        let x = lu_solve(&m, &rhs)?;
        assert!((x.read(0, 0) - 1.0).abs() < 1e-12);
        assert!((x.read(1, 0) - 1.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn config_defaults_from_json() {
        let config: TpsConfig = serde_json::from_str(r#"{"lambda": 0.5}"#).unwrap();
        assert_eq!(config.lambda, 0.5);
        assert_eq!(config.regularization, 0.1);
    }
}
