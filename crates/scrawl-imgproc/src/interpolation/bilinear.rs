use scrawl_image::ImageSize;

/// Kernel for bilinear interpolation with border clamping.
///
/// # Arguments
///
/// * `plane` - The row-major pixel data.
/// * `size` - The size of the plane.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
///
/// # Returns
///
/// The interpolated pixel value.
pub(crate) fn bilinear_interpolation(plane: &[f32], size: ImageSize, u: f32, v: f32) -> f32 {
    let (rows, cols) = (size.height, size.width);

    let u = u.clamp(0.0, (cols - 1) as f32);
    let v = v.clamp(0.0, (rows - 1) as f32);

    let iu0 = (u.floor() as usize).min(cols - 1);
    let iv0 = (v.floor() as usize).min(rows - 1);
    let iu1 = (iu0 + 1).min(cols - 1);
    let iv1 = (iv0 + 1).min(rows - 1);

    let frac_u = u - iu0 as f32;
    let frac_v = v - iv0 as f32;

    let p00 = plane[iv0 * cols + iu0];
    let p01 = plane[iv0 * cols + iu1];
    let p10 = plane[iv1 * cols + iu0];
    let p11 = plane[iv1 * cols + iu1];

    let top = p00 + (p01 - p00) * frac_u;
    let bottom = p10 + (p11 - p10) * frac_u;

    top + (bottom - top) * frac_v
}
