use scrawl_tensor::Tensor2;

/// Default offset added to the squared distance inside the logarithm.
pub const DEFAULT_EPS: f32 = 1e-5;

/// Thin-plate kernel of a squared distance.
#[inline]
pub(crate) fn kernel(sq_dist: f64, eps: f64) -> f64 {
    if sq_dist == 0.0 {
        return 0.0;
    }
    0.5 * sq_dist * (sq_dist + eps).ln()
}

#[inline]
pub(crate) fn squared_distance<const D: usize>(a: &[f32; D], b: &[f32; D]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = x as f64 - y as f64;
            d * d
        })
        .sum()
}

/// Compute the pairwise radial basis matrix between two point sets.
///
/// `Phi[i, j] = 0.5 * d * ln(d + eps)` where `d` is the squared euclidean distance between
/// `points[i]` and `centers[j]`. Coincident points give exactly zero.
///
/// # Arguments
///
/// * `points` - The m evaluation points.
/// * `centers` - The n kernel centers.
/// * `eps` - The offset keeping the logarithm finite, usually [`DEFAULT_EPS`].
///
/// # Returns
///
/// A tensor of shape (m, n).
///
/// # Example
///
/// ```
/// use scrawl_tps::{rbf, DEFAULT_EPS};
///
/// let points = [[0.0, 0.0], [1.0, 0.0]];
/// let phi = rbf(&points, &points, DEFAULT_EPS);
///
/// assert_eq!(phi.shape, [2, 2]);
/// assert_eq!(phi.get([0, 0]), Some(&0.0));
/// ```
pub fn rbf<const D: usize>(points: &[[f32; D]], centers: &[[f32; D]], eps: f32) -> Tensor2<f32> {
    let eps = eps as f64;
    Tensor2::from_shape_fn([points.len(), centers.len()], |[i, j]| {
        kernel(squared_distance(&points[i], &centers[j]), eps) as f32
    })
}
