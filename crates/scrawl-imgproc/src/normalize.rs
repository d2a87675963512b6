use scrawl_image::{Image, ImageError, ImageSize};

/// Median of the pixel values, averaging the two middle values for even counts.
fn median(values: &[f32]) -> f32 {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f32::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Per-axis placement of the source inside the target: (crop start, pad before, copied length).
fn placement(src_len: usize, dst_len: usize) -> (usize, usize, usize) {
    if dst_len >= src_len {
        let diff = dst_len - src_len;
        (0, diff / 2, src_len)
    } else {
        let diff = src_len - dst_len;
        (diff / 2, 0, dst_len)
    }
}

/// Place an image in the center of a canvas of the given size.
///
/// Each axis is handled on its own: when the target is larger the image is padded,
/// `diff / 2` pixels before and the rest after, with the median intensity of the image;
/// when it is smaller the central part is cropped, starting at `diff / 2`.
///
/// # Errors
///
/// Fails with [`ImageError::EmptyImage`] if the source or the target has no pixels.
///
/// # Example
///
/// ```
/// use scrawl_image::Image;
/// use scrawl_imgproc::normalize::centered;
///
/// let image = Image::<f32, 1>::new([2, 1].into(), vec![0.0, 1.0]).unwrap();
/// let padded = centered(&image, [4, 1].into()).unwrap();
///
/// assert_eq!(padded.as_slice(), &[0.5, 0.0, 1.0, 0.5]);
/// ```
pub fn centered(src: &Image<f32, 1>, size: ImageSize) -> Result<Image<f32, 1>, ImageError> {
    if src.size().is_empty() {
        return Err(ImageError::EmptyImage(src.width(), src.height()));
    }
    if size.is_empty() {
        return Err(ImageError::EmptyImage(size.width, size.height));
    }

    let fill = median(src.as_slice());
    let mut dst = Image::from_size_val(size, fill);

    let (crop_y, pad_y, len_y) = placement(src.height(), size.height);
    let (crop_x, pad_x, len_x) = placement(src.width(), size.width);

    let src_data = src.as_slice();
    let dst_data = dst.as_slice_mut();
    for row in 0..len_y {
        let src_start = (crop_y + row) * src.width() + crop_x;
        let dst_start = (pad_y + row) * size.width + pad_x;
        dst_data[dst_start..dst_start + len_x]
            .copy_from_slice(&src_data[src_start..src_start + len_x]);
    }

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_odd_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn centered_pads_with_median() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new([1, 1].into(), vec![0.8])?;
        let dst = centered(&image, [3, 2].into())?;
        // one row of padding goes after, one column before and one after
        assert_eq!(dst.as_slice(), &[0.8; 6]);
        assert_eq!(dst.size(), ImageSize { width: 3, height: 2 });
        Ok(())
    }

    #[test]
    fn centered_pad_split() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new([1, 3].into(), vec![0.0, 1.0, 0.0])?;
        let dst = centered(&image, [1, 6].into())?;
        // diff = 3: one row before, two after, filled with the median (0.0)
        assert_eq!(dst.as_slice(), &[0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
        Ok(())
    }

    #[test]
    fn centered_crops() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new([5, 1].into(), vec![0.0, 1.0, 2.0, 3.0, 4.0])?;
        let dst = centered(&image, [2, 1].into())?;
        // diff = 3, crop starts at 1
        assert_eq!(dst.as_slice(), &[1.0, 2.0]);
        Ok(())
    }

    #[test]
    fn centered_mixed_axes() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new([4, 1].into(), vec![0.0, 1.0, 2.0, 3.0])?;
        let dst = centered(&image, [2, 3].into())?;
        assert_eq!(dst.as_slice(), &[1.5, 1.5, 1.0, 2.0, 1.5, 1.5]);
        Ok(())
    }

    #[test]
    fn centered_rejects_empty() {
        let image = Image::<f32, 1>::from_size_val([3, 3].into(), 0.0);
        assert!(centered(&image, [0, 3].into()).is_err());
    }
}
