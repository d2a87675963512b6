use scrawl_image::{ImageBatch, ImageError, ImageSize};
use scrawl_tensor::{Tensor3, Tensor4};

use super::{interpolate_pixel, InterpolationMode};
use crate::parallel;

/// How [`grid_sample`] treats grid coordinates that fall outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridPadding {
    /// Clamp to the nearest border pixel.
    #[default]
    Border,
    /// Treat out-of-range pixels as zero.
    Zeros,
}

/// Evenly spaced values over `[start, end]`, both ends included.
///
/// A single step yields `start`, matching the usual `linspace` convention.
///
/// ```
/// use scrawl_imgproc::interpolation::grid::linspace;
///
/// assert_eq!(linspace(-1.0, 1.0, 3), vec![-1.0, 0.0, 1.0]);
/// assert_eq!(linspace(-2.0, 2.0, 1), vec![-2.0]);
/// ```
pub fn linspace(start: f32, end: f32, steps: usize) -> Vec<f32> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (steps - 1) as f32;
            (0..steps).map(|i| start + step * i as f32).collect()
        }
    }
}

/// Map a normalized coordinate in `[-1, 1]` to a pixel coordinate.
///
/// `-1` and `1` are the centers of the first and last pixels.
#[inline]
pub fn unnormalize_coord(coord: f32, len: usize) -> f32 {
    (coord + 1.0) * 0.5 * (len.saturating_sub(1)) as f32
}

/// Map a pixel coordinate to the normalized `[-1, 1]` range.
#[inline]
pub fn normalize_coord(pixel: f32, len: usize) -> f32 {
    if len <= 1 {
        return 0.0;
    }
    2.0 * pixel / (len - 1) as f32 - 1.0
}

/// Create an identity sampling grid of shape (H, W, 2).
pub fn identity_grid(size: ImageSize) -> Tensor3<f32> {
    Tensor3::from_shape_fn([size.height, size.width, 2], |[y, x, k]| {
        if k == 0 {
            normalize_coord(x as f32, size.width)
        } else {
            normalize_coord(y as f32, size.height)
        }
    })
}

/// Resample every image in a batch at the locations given by a sampling grid.
///
/// # Arguments
///
/// * `src` - The input batch with shape (N, 1, H, W).
/// * `grid` - The sampling grid with shape (H_out, W_out, 2) holding normalized `(x, y)`
///   coordinates, shared by every image in the batch.
/// * `interpolation` - The interpolation mode to use.
/// * `padding` - The policy for coordinates outside `[-1, 1]`.
///
/// # Returns
///
/// A new batch with shape (N, 1, H_out, W_out).
///
/// # Example
///
/// ```
/// use scrawl_image::ImageBatch;
/// use scrawl_imgproc::interpolation::{grid::identity_grid, grid_sample, GridPadding, InterpolationMode};
///
/// let src = ImageBatch::new(1, [3, 2].into(), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
/// let grid = identity_grid(src.size());
/// let dst = grid_sample(&src, &grid, InterpolationMode::Bilinear, GridPadding::Border).unwrap();
///
/// assert_eq!(dst.shape, src.shape);
/// ```
pub fn grid_sample(
    src: &ImageBatch,
    grid: &Tensor3<f32>,
    interpolation: InterpolationMode,
    padding: GridPadding,
) -> Result<ImageBatch, ImageError> {
    let [out_rows, out_cols, two] = grid.shape;
    if two != 2 || out_rows == 0 || out_cols == 0 {
        return Err(ImageError::InvalidGridShape(grid.shape));
    }

    let size = src.size();
    let grid_data = grid.as_slice();
    let mut dst = Tensor4::<f32>::zeros([src.batch_size(), 1, out_rows, out_cols]);

    parallel::par_iter_rows(dst.as_slice_mut(), out_cols, |row, dst_row| {
        let (n, r) = (row / out_rows, row % out_rows);
        let plane = &src.as_slice()[n * size.area()..(n + 1) * size.area()];
        let grid_row = &grid_data[r * out_cols * 2..(r + 1) * out_cols * 2];

        dst_row
            .iter_mut()
            .zip(grid_row.chunks_exact(2))
            .for_each(|(pixel, xy)| {
                let u = unnormalize_coord(xy[0], size.width);
                let v = unnormalize_coord(xy[1], size.height);
                *pixel = match padding {
                    GridPadding::Border => interpolate_pixel(plane, size, u, v, interpolation),
                    GridPadding::Zeros => sample_zeros(plane, size, u, v, interpolation),
                };
            });
    });

    ImageBatch::from_tensor(dst)
}

/// Sample a plane treating everything outside of it as zero.
fn sample_zeros(plane: &[f32], size: ImageSize, u: f32, v: f32, mode: InterpolationMode) -> f32 {
    let fetch = |x: isize, y: isize| -> f32 {
        if x < 0 || y < 0 || x >= size.width as isize || y >= size.height as isize {
            0.0
        } else {
            plane[y as usize * size.width + x as usize]
        }
    };

    match mode {
        InterpolationMode::Nearest => fetch(u.round() as isize, v.round() as isize),
        InterpolationMode::Bilinear => {
            let (x0, y0) = (u.floor(), v.floor());
            let (fu, fv) = (u - x0, v - y0);
            let (x0, y0) = (x0 as isize, y0 as isize);

            let top = fetch(x0, y0) * (1.0 - fu) + fetch(x0 + 1, y0) * fu;
            let bottom = fetch(x0, y0 + 1) * (1.0 - fu) + fetch(x0 + 1, y0 + 1) * fu;
            top * (1.0 - fv) + bottom * fv
        }
    }
}
