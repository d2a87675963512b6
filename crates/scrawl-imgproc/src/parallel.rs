use rayon::prelude::*;

use scrawl_image::{ImageBatch, ImageError};

/// Apply a function to each (source, destination) image plane pair in parallel.
///
/// # Errors
///
/// The source and destination batches must have the same shape.
pub fn par_iter_planes(
    src: &ImageBatch,
    dst: &mut ImageBatch,
    f: impl Fn(&[f32], &mut [f32]) + Send + Sync,
) -> Result<(), ImageError> {
    if src.shape != dst.shape {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    let area = src.size().area();
    src.as_slice()
        .par_chunks_exact(area)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(area))
        .for_each(|(src_plane, dst_plane)| f(src_plane, dst_plane));

    Ok(())
}

/// Apply a function to each row of a row-major buffer in parallel.
///
/// The closure receives the global row index, counting rows across all planes
/// of a batch, and the mutable row.
pub fn par_iter_rows(dst: &mut [f32], cols: usize, f: impl Fn(usize, &mut [f32]) + Send + Sync) {
    if cols == 0 {
        return;
    }
    dst.par_chunks_exact_mut(cols)
        .enumerate()
        .for_each(|(row, dst_row)| f(row, dst_row));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planes_pairwise() -> Result<(), ImageError> {
        let src = ImageBatch::new(2, [2, 2].into(), (0..8).map(|x| x as f32).collect())?;
        let mut dst = ImageBatch::from_size_val(2, [2, 2].into(), 0.0)?;
        par_iter_planes(&src, &mut dst, |s, d| {
            let total: f32 = s.iter().sum();
            d.iter_mut().for_each(|v| *v = total);
        })?;
        assert_eq!(dst.plane(0)?, &[6.0; 4]);
        assert_eq!(dst.plane(1)?, &[22.0; 4]);
        Ok(())
    }

    #[test]
    fn planes_shape_mismatch() -> Result<(), ImageError> {
        let src = ImageBatch::from_size_val(1, [2, 2].into(), 0.0)?;
        let mut dst = ImageBatch::from_size_val(1, [3, 2].into(), 0.0)?;
        assert!(par_iter_planes(&src, &mut dst, |_, _| {}).is_err());
        Ok(())
    }

    #[test]
    fn rows_global_index() {
        let mut data = vec![0.0f32; 6];
        par_iter_rows(&mut data, 2, |row, r| r.iter_mut().for_each(|v| *v = row as f32));
        assert_eq!(data, vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0]);
    }
}
