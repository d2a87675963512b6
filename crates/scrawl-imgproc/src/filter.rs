use scrawl_image::{ImageBatch, ImageError, ImageSize};

use crate::parallel;

/// Sobel response along y; its transpose gives the response along x.
const SOBEL_Y: [[f32; 3]; 3] = [[1.0, 2.0, 1.0], [0.0, 0.0, 0.0], [-1.0, -2.0, -1.0]];

/// Cross-correlate a 3x3 kernel at `(x, y)`, reading zeros outside the plane.
fn correlate3x3(
    plane: &[f32],
    size: ImageSize,
    x: usize,
    y: usize,
    kernel: impl Fn(usize, usize) -> f32,
) -> f32 {
    let mut acc = 0.0;
    for ky in 0..3 {
        let Some(yy) = (y + ky).checked_sub(1).filter(|&yy| yy < size.height) else {
            continue;
        };
        for kx in 0..3 {
            let Some(xx) = (x + kx).checked_sub(1).filter(|&xx| xx < size.width) else {
                continue;
            };
            acc += kernel(ky, kx) * plane[yy * size.width + xx];
        }
    }
    acc
}

/// Compute the Sobel gradient magnitude of every image in a batch.
///
/// `gy` correlates the image with `[[1, 2, 1], [0, 0, 0], [-1, -2, -1]]`, `gx` with its
/// transpose, both with zero padding. The output is `sqrt(gx^2 + gy^2)`.
///
/// # Example
///
/// ```
/// use scrawl_image::ImageBatch;
/// use scrawl_imgproc::filter::gradient_magnitude;
///
/// let flat = ImageBatch::from_size_val(1, [5, 5].into(), 0.5).unwrap();
/// let mgn = gradient_magnitude(&flat).unwrap();
///
/// // interior pixels of a flat image have no gradient
/// assert_eq!(mgn.plane(0).unwrap()[12], 0.0);
/// ```
pub fn gradient_magnitude(src: &ImageBatch) -> Result<ImageBatch, ImageError> {
    let size = src.size();
    let mut dst = src.clone();

    parallel::par_iter_planes(src, &mut dst, |src_plane, dst_plane| {
        for y in 0..size.height {
            for x in 0..size.width {
                let gy = correlate3x3(src_plane, size, x, y, |ky, kx| SOBEL_Y[ky][kx]);
                let gx = correlate3x3(src_plane, size, x, y, |ky, kx| SOBEL_Y[kx][ky]);
                dst_plane[y * size.width + x] = (gx * gx + gy * gy).sqrt();
            }
        }
    })?;

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn vertical_edge() -> Result<(), ImageError> {
        // left half dark, right half bright
        #[rustfmt::skip]
        let data = vec![
            0.0, 0.0, 1.0, 1.0,
            0.0, 0.0, 1.0, 1.0,
            0.0, 0.0, 1.0, 1.0,
            0.0, 0.0, 1.0, 1.0,
        ];
        let src = ImageBatch::new(1, [4, 4].into(), data)?;
        let mgn = gradient_magnitude(&src)?;
        let plane = mgn.plane(0)?;

        // interior pixels next to the edge see |gx| = 4, gy = 0
        assert_relative_eq!(plane[5], 4.0);
        assert_relative_eq!(plane[6], 4.0);
        Ok(())
    }

    #[test]
    fn zero_padding_at_borders() -> Result<(), ImageError> {
        let src = ImageBatch::from_size_val(1, [3, 3].into(), 1.0)?;
        let mgn = gradient_magnitude(&src)?;
        let plane = mgn.plane(0)?;

        assert_relative_eq!(plane[4], 0.0);
        // top-left corner: gx = -(0 + 2 + 1) = -3, gy = -(0 + 2 + 1) = -3
        assert_relative_eq!(plane[0], (18.0f32).sqrt());
        Ok(())
    }
}
