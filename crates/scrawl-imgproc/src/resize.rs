use scrawl_image::{Image, ImageError, ImageSize};

use crate::interpolation::{interpolate_pixel, InterpolationMode};
use crate::parallel;

/// Compute the output size of a resize given an optional target height and width.
///
/// When only one dimension is given the other one is derived from the source aspect
/// ratio and rounded to the nearest integer. When both are given they are used as-is.
///
/// # Errors
///
/// * [`ImageError::MissingResizeDimension`] if neither dimension is given.
/// * [`ImageError::EmptyImage`] if the source or the computed size has a zero dimension.
///
/// # Example
///
/// ```
/// use scrawl_image::ImageSize;
/// use scrawl_imgproc::resize::target_size;
///
/// let src = ImageSize { width: 300, height: 100 };
/// let dst = target_size(src, Some(32), None).unwrap();
/// assert_eq!(dst, ImageSize { width: 96, height: 32 });
/// ```
pub fn target_size(
    src: ImageSize,
    height: Option<usize>,
    width: Option<usize>,
) -> Result<ImageSize, ImageError> {
    if src.is_empty() {
        return Err(ImageError::EmptyImage(src.width, src.height));
    }

    let (src_w, src_h) = (src.width as f64, src.height as f64);
    let size = match (height, width) {
        (Some(height), Some(width)) => ImageSize { width, height },
        (Some(height), None) => ImageSize {
            width: (height as f64 * src_w / src_h).round() as usize,
            height,
        },
        (None, Some(width)) => ImageSize {
            width,
            height: (width as f64 * src_h / src_w).round() as usize,
        },
        (None, None) => return Err(ImageError::MissingResizeDimension),
    };

    if size.is_empty() {
        return Err(ImageError::EmptyImage(size.width, size.height));
    }

    Ok(size)
}

/// Resize a single-channel image into a preallocated destination.
///
/// The sampling uses pixel-center alignment: the output pixel `x` reads the source at
/// `(x + 0.5) * src_width / dst_width - 0.5`, clamped to the borders.
///
/// # Arguments
///
/// * `src` - The input image container.
/// * `dst` - The output image container, whose size defines the target size.
/// * `interpolation` - The interpolation mode to use.
///
/// # Example
///
/// ```
/// use scrawl_image::{Image, ImageSize};
/// use scrawl_imgproc::interpolation::InterpolationMode;
/// use scrawl_imgproc::resize::resize_native;
///
/// let image = Image::<f32, 1>::from_size_val([4, 5].into(), 0.5);
/// let mut image_resized = Image::<f32, 1>::from_size_val([2, 3].into(), 0.0);
///
/// resize_native(&image, &mut image_resized, InterpolationMode::Bilinear).unwrap();
///
/// assert_eq!(image_resized.size().width, 2);
/// assert_eq!(image_resized.size().height, 3);
/// ```
pub fn resize_native(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    if src.size().is_empty() {
        return Err(ImageError::EmptyImage(src.width(), src.height()));
    }
    if dst.size().is_empty() {
        return Err(ImageError::EmptyImage(dst.width(), dst.height()));
    }

    let src_size = src.size();
    let scale_x = src.width() as f32 / dst.width() as f32;
    let scale_y = src.height() as f32 / dst.height() as f32;
    let dst_cols = dst.cols();
    let src_data = src.as_slice();

    parallel::par_iter_rows(dst.as_slice_mut(), dst_cols, |row, dst_row| {
        let v = (row as f32 + 0.5) * scale_y - 0.5;
        dst_row.iter_mut().enumerate().for_each(|(col, pixel)| {
            let u = (col as f32 + 0.5) * scale_x - 0.5;
            *pixel = interpolate_pixel(src_data, src_size, u, v, interpolation);
        });
    });

    Ok(())
}

/// Resize a single-channel image to a target height and/or width.
///
/// Only one dimension preserves the aspect ratio, see [`target_size`]. The result is
/// computed with bilinear interpolation.
///
/// # Example
///
/// ```
/// use scrawl_image::Image;
/// use scrawl_imgproc::resize::resize;
///
/// let image = Image::<f32, 1>::from_size_val([60, 20].into(), 1.0);
/// let resized = resize(&image, Some(10), None).unwrap();
///
/// assert_eq!(resized.width(), 30);
/// assert_eq!(resized.height(), 10);
/// ```
pub fn resize(
    src: &Image<f32, 1>,
    height: Option<usize>,
    width: Option<usize>,
) -> Result<Image<f32, 1>, ImageError> {
    let size = target_size(src.size(), height, width)?;
    log::trace!("resize {} -> {}", src.size(), size);

    let mut dst = Image::from_size_val(size, 0.0);
    resize_native(src, &mut dst, InterpolationMode::Bilinear)?;
    Ok(dst)
}
