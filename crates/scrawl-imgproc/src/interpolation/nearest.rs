use scrawl_image::ImageSize;

/// Kernel for nearest neighbor interpolation with border clamping.
pub(crate) fn nearest_neighbor_interpolation(
    plane: &[f32],
    size: ImageSize,
    u: f32,
    v: f32,
) -> f32 {
    let (rows, cols) = (size.height, size.width);

    let iu = u.round().clamp(0.0, (cols - 1) as f32) as usize;
    let iv = v.round().clamp(0.0, (rows - 1) as f32) as usize;

    plane[iv * cols + iu]
}
