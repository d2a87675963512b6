use rayon::prelude::*;

use scrawl_tensor::Tensor3;

use crate::error::TpsError;
use crate::rbf::{kernel, squared_distance, DEFAULT_EPS};
use crate::solve::TpsWeights;

/// Warp a single point with solved weights.
fn deform_point<const D: usize>(
    point: &[f32; D],
    control_points: &[[f32; D]],
    weights: &TpsWeights<D>,
) -> [f32; D] {
    let n = control_points.len();
    let eps = DEFAULT_EPS as f64;

    let mut out = [0.0f64; D];
    for (j, center) in control_points.iter().enumerate() {
        let phi = kernel(squared_distance(point, center), eps);
        for (k, o) in out.iter_mut().enumerate() {
            *o += phi * weights.at(j, k) as f64;
        }
    }
    for (k, o) in out.iter_mut().enumerate() {
        for (d, &coord) in point.iter().enumerate() {
            *o += coord as f64 * weights.at(n + d, k) as f64;
        }
        *o += weights.at(n + D, k) as f64;
    }

    out.map(|v| v as f32)
}

/// Apply a solved thin-plate spline to a set of points.
///
/// Computes `[rbf(points, control_points) | points | 1] * W` and drops the homogeneous
/// output column.
///
/// # Arguments
///
/// * `points` - The m points to warp.
/// * `control_points` - The control points the weights were solved with.
/// * `weights` - The solved weights.
///
/// # Errors
///
/// * [`TpsError::PointCountMismatch`] if `control_points` does not match the weights.
/// * [`TpsError::NonFinitePoint`] if a point has a NaN or infinite coordinate.
pub fn deform<const D: usize>(
    points: &[[f32; D]],
    control_points: &[[f32; D]],
    weights: &TpsWeights<D>,
) -> Result<Vec<[f32; D]>, TpsError> {
    if control_points.len() != weights.num_control_points() {
        return Err(TpsError::PointCountMismatch(
            control_points.len(),
            weights.num_control_points(),
        ));
    }
    if let Some(i) = points.iter().position(|p| p.iter().any(|v| !v.is_finite())) {
        return Err(TpsError::NonFinitePoint(i));
    }

    Ok(points
        .par_iter()
        .map(|p| deform_point(p, control_points, weights))
        .collect())
}

/// Apply a solved thin-plate spline to every point of a sampling grid.
///
/// # Arguments
///
/// * `grid` - The sampling grid with shape (H, W, 2).
/// * `control_points` - The control points the weights were solved with.
/// * `weights` - The solved weights.
///
/// # Returns
///
/// The deformed grid with the same shape, ready to be passed to a grid sampler.
pub fn deform_grid(
    grid: &Tensor3<f32>,
    control_points: &[[f32; 2]],
    weights: &TpsWeights<2>,
) -> Result<Tensor3<f32>, TpsError> {
    if grid.shape[2] != 2 {
        return Err(TpsError::InvalidGridShape(grid.shape));
    }

    let points = grid
        .as_slice()
        .chunks_exact(2)
        .map(|xy| [xy[0], xy[1]])
        .collect::<Vec<_>>();

    let warped = deform(&points, control_points, weights)?;

    Ok(Tensor3::from_shape_vec(
        grid.shape,
        warped.into_iter().flatten().collect(),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solve;

    fn lattice(cols: usize, rows: usize) -> Vec<[f32; 2]> {
        let step = |i: usize, n: usize| -1.0 + 2.0 * i as f32 / (n - 1) as f32;
        (0..rows)
            .flat_map(|r| (0..cols).map(move |c| [step(c, cols), step(r, rows)]))
            .collect()
    }

    fn max_deviation(a: &[[f32; 2]], b: &[[f32; 2]]) -> f32 {
        a.iter()
            .zip(b)
            .flat_map(|(p, q)| [(p[0] - q[0]).abs(), (p[1] - q[1]).abs()])
            .fold(0.0, f32::max)
    }

    #[test]
    fn identity_on_control_grid() -> Result<(), TpsError> {
        for (cols, rows) in [(3, 3), (5, 3)] {
            let control = lattice(cols, rows);
            let weights = solve(&control, &control, 0.01)?;

            let warped = deform(&control, &control, &weights)?;
            assert!(max_deviation(&warped, &control) < 0.05);

            let dense = lattice(11, 11);
            let warped = deform(&dense, &control, &weights)?;
            assert!(max_deviation(&warped, &dense) < 0.05);
        }
        Ok(())
    }

    #[test]
    fn translation_follows_targets() -> Result<(), TpsError> {
        let control = lattice(3, 3);
        let target = control
            .iter()
            .map(|p| [p[0] + 0.2, p[1]])
            .collect::<Vec<_>>();
        let weights = solve(&control, &target, 0.01)?;

        let warped = deform(&control, &control, &weights)?;
        assert!(max_deviation(&warped, &target) < 0.05);
        Ok(())
    }

    #[test]
    fn control_point_mismatch() -> Result<(), TpsError> {
        let control = lattice(3, 3);
        let weights = solve(&control, &control, 0.01)?;
        assert_eq!(
            deform(&[[0.0, 0.0]], &control[..4], &weights),
            Err(TpsError::PointCountMismatch(4, 9))
        );
        assert_eq!(
            deform(&[[0.0, f32::INFINITY]], &control, &weights),
            Err(TpsError::NonFinitePoint(0))
        );
        Ok(())
    }

    #[test]
    fn grid_keeps_shape() -> Result<(), TpsError> {
        let control = lattice(3, 3);
        let weights = solve(&control, &control, 0.01)?;

        let grid = Tensor3::from_shape_fn([4, 6, 2], |[r, c, k]| {
            if k == 0 {
                -1.0 + 2.0 * c as f32 / 5.0
            } else {
                -1.0 + 2.0 * r as f32 / 3.0
            }
        });
        let warped = deform_grid(&grid, &control, &weights)?;
        assert_eq!(warped.shape, grid.shape);
        for (a, b) in warped.iter().zip(grid.iter()) {
            assert!((a - b).abs() < 0.05);
        }

        let bad = Tensor3::<f32>::zeros([2, 2, 3]);
        assert_eq!(
            deform_grid(&bad, &control, &weights),
            Err(TpsError::InvalidGridShape([2, 2, 3]))
        );
        Ok(())
    }

    #[test]
    fn one_dimensional_points() -> Result<(), TpsError> {
        let control = [[-1.0], [0.0], [1.0]];
        let weights = solve(&control, &control, 0.01)?;
        let warped = deform(&[[0.5]], &control, &weights)?;
        assert!((warped[0][0] - 0.5).abs() < 0.05);
        Ok(())
    }
}
