//! Grayscale morphology on image batches.
//!
//! Every operator is derived from a square max filter (a max pooling with
//! stride one and a symmetric radius of `kernel_size / 2`):
//!
//! - dilation: max over the `k x k` neighborhood
//! - erosion: `-dilate(-x)`, the min over the neighborhood
//! - opening: erosion followed by dilation
//! - closing: dilation followed by erosion
//!
//! Out-of-bounds neighbors are ignored by both the max and the min. For a
//! square window this is the same as padding with border replication, and it
//! keeps dilation and erosion exact duals at the edges.

mod mode;
mod pool;

pub use mode::MorphologyMode;

use scrawl_image::{ImageBatch, ImageError};

use crate::parallel;

/// Validate a kernel size and return its radius.
fn kernel_radius(kernel_size: usize) -> Result<usize, ImageError> {
    if kernel_size == 0 || kernel_size % 2 == 0 {
        return Err(ImageError::InvalidKernelSize(kernel_size));
    }
    Ok(kernel_size / 2)
}

fn negate(src: &ImageBatch) -> ImageBatch {
    src.map(|v| -v)
}

/// Dilate every image of a batch with a square `kernel_size x kernel_size` window.
///
/// # Errors
///
/// Returns [`ImageError::InvalidKernelSize`] if `kernel_size` is not a positive odd integer.
///
/// # Example
///
/// ```
/// use scrawl_image::ImageBatch;
/// use scrawl_imgproc::morphology::dilate;
///
/// let src = ImageBatch::new(1, [3, 1].into(), vec![0.0, 1.0, 0.0]).unwrap();
/// let dst = dilate(&src, 3).unwrap();
/// assert_eq!(dst.as_slice(), &[1.0, 1.0, 1.0]);
/// ```
pub fn dilate(src: &ImageBatch, kernel_size: usize) -> Result<ImageBatch, ImageError> {
    let radius = kernel_radius(kernel_size)?;
    let mut dst = src.clone();
    if radius == 0 {
        return Ok(dst);
    }

    let size = src.size();
    parallel::par_iter_planes(src, &mut dst, |src_plane, dst_plane| {
        pool::max_pool_plane(src_plane, dst_plane, size, radius);
    })?;

    Ok(dst)
}

/// Erode every image of a batch, computed as `-dilate(-src)`.
///
/// # Errors
///
/// Returns [`ImageError::InvalidKernelSize`] if `kernel_size` is not a positive odd integer.
pub fn erode(src: &ImageBatch, kernel_size: usize) -> Result<ImageBatch, ImageError> {
    let dilated = dilate(&negate(src), kernel_size)?;
    Ok(negate(&dilated))
}

/// Opening: erosion followed by dilation.
///
/// Removes bright features smaller than the kernel.
pub fn open(src: &ImageBatch, kernel_size: usize) -> Result<ImageBatch, ImageError> {
    dilate(&erode(src, kernel_size)?, kernel_size)
}

/// Closing: dilation followed by erosion.
///
/// Fills dark gaps smaller than the kernel.
pub fn close(src: &ImageBatch, kernel_size: usize) -> Result<ImageBatch, ImageError> {
    erode(&dilate(src, kernel_size)?, kernel_size)
}

/// Apply a morphological operator to every image of a batch.
///
/// # Arguments
///
/// * `src` - The input batch with shape (N, 1, H, W).
/// * `kernel_size` - The side of the square window, a positive odd integer.
/// * `mode` - The operator to apply.
///
/// # Returns
///
/// A new batch with the same shape as `src`.
pub fn morphology(
    src: &ImageBatch,
    kernel_size: usize,
    mode: MorphologyMode,
) -> Result<ImageBatch, ImageError> {
    log::trace!("morphology {mode} with kernel {kernel_size}");
    match mode {
        MorphologyMode::Dilation => dilate(src, kernel_size),
        MorphologyMode::Erosion => erode(src, kernel_size),
        MorphologyMode::Opening => open(src, kernel_size),
        MorphologyMode::Closing => close(src, kernel_size),
    }
}
