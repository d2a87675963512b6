use scrawl_image::{ImageBatch, ImageError, ImageSize};
use scrawl_tensor::Tensor3;

use crate::interpolation::{grid::linspace, grid_sample, GridPadding, InterpolationMode};

/// Parameters of the rotation + horizontal shear applied by [`affine_grid`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AffineParams {
    /// Rotation angle in radians.
    pub rotation: f32,
    /// Horizontal shear factor, scaled by the slant strength.
    pub slant: f32,
}

impl AffineParams {
    /// Parameters leaving the grid untouched.
    pub fn identity() -> Self {
        Self::default()
    }
}

/// Returns the 2x2 rotation matrix `[[cos, -sin], [sin, cos]]` in row-major order.
///
/// Points are multiplied as row vectors, `[x', y'] = [x, y] * R`.
///
/// # Example
///
/// ```
/// use scrawl_imgproc::warp::rotation_matrix;
///
/// let r = rotation_matrix(0.0);
/// assert_eq!(r, [1.0, -0.0, 0.0, 1.0]);
/// ```
pub fn rotation_matrix(angle: f32) -> [f32; 4] {
    let (sin, cos) = angle.sin_cos();
    [cos, -sin, sin, cos]
}

/// Build the normalized sampling grid of a rotation + slant warp.
///
/// The grid starts centered in pixel units, x spanning `[-W/2, W/2]` across columns and
/// y spanning `[-H/2, H/2]` down rows. Each point is sheared horizontally by
/// `slant * slant_strength * y / H`, rotated, and divided by half the image size.
///
/// # Arguments
///
/// * `size` - The size of the image to sample.
/// * `params` - The rotation and slant.
/// * `slant_strength` - The shear scale in pixels per image height.
///
/// # Returns
///
/// A grid of shape (H, W, 2) holding `(x, y)` in the `[-1, 1]` convention. Points pushed
/// outside that range are handled by the sampler.
pub fn affine_grid(size: ImageSize, params: &AffineParams, slant_strength: f32) -> Tensor3<f32> {
    let (width, height) = (size.width as f32, size.height as f32);
    let xs = linspace(-width / 2.0, width / 2.0, size.width);
    let ys = linspace(-height / 2.0, height / 2.0, size.height);

    let shear = params.slant * slant_strength / height;
    let [r00, r01, r10, r11] = rotation_matrix(params.rotation);

    Tensor3::from_shape_fn([size.height, size.width, 2], |[r, c, k]| {
        let y = ys[r];
        let x = xs[c] + shear * y;
        if k == 0 {
            (x * r00 + y * r10) / (width / 2.0)
        } else {
            (x * r01 + y * r11) / (height / 2.0)
        }
    })
}

/// Warp every image of a batch with the same rotation + slant.
///
/// The images are resampled with bilinear interpolation, clamping samples that fall
/// outside the image to the border pixels.
///
/// # Returns
///
/// A new batch with the same shape as `src`.
pub fn warp_affine_grid(
    src: &ImageBatch,
    params: &AffineParams,
    slant_strength: f32,
) -> Result<ImageBatch, ImageError> {
    let grid = affine_grid(src.size(), params, slant_strength);
    grid_sample(
        src,
        &grid,
        InterpolationMode::Bilinear,
        GridPadding::Border,
    )
}
