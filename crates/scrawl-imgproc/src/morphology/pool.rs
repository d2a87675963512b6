use scrawl_image::ImageSize;

/// Square max filter with stride one over a single plane.
///
/// The `(2 * radius + 1)^2` window is split into a horizontal and a vertical pass,
/// each one only looking at in-bounds neighbors.
pub(crate) fn max_pool_plane(src: &[f32], dst: &mut [f32], size: ImageSize, radius: usize) {
    let (rows, cols) = (size.height, size.width);
    let mut horizontal = vec![f32::NEG_INFINITY; rows * cols];

    for (src_row, tmp_row) in src
        .chunks_exact(cols)
        .zip(horizontal.chunks_exact_mut(cols))
    {
        for (x, out) in tmp_row.iter_mut().enumerate() {
            let lo = x.saturating_sub(radius);
            let hi = (x + radius).min(cols - 1);
            *out = window_max(src_row[lo..=hi].iter().copied());
        }
    }

    for y in 0..rows {
        let lo = y.saturating_sub(radius);
        let hi = (y + radius).min(rows - 1);
        for x in 0..cols {
            dst[y * cols + x] = window_max((lo..=hi).map(|yy| horizontal[yy * cols + x]));
        }
    }
}

#[inline]
fn window_max(values: impl Iterator<Item = f32>) -> f32 {
    values.fold(f32::NEG_INFINITY, f32::max)
}
