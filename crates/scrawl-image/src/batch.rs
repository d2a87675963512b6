use std::ops;

use scrawl_tensor::Tensor4;

use crate::{error::ImageError, Image, ImageSize};

/// A batch of single-channel `f32` images with shape (N, 1, H, W).
///
/// Every batched operation in the workspace consumes and produces this type,
/// a single image being a batch of one. Construction guarantees a channel
/// dimension of one and non-zero batch, height and width.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageBatch(Tensor4<f32>);

impl ops::Deref for ImageBatch {
    type Target = Tensor4<f32>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl ImageBatch {
    /// Wrap a tensor, validating the (N, 1, H, W) layout.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidBatchShape`] when the channel dimension is not one or
    /// any other dimension is zero.
    pub fn from_tensor(tensor: Tensor4<f32>) -> Result<Self, ImageError> {
        let [n, c, h, w] = tensor.shape;
        if c != 1 || n == 0 || h == 0 || w == 0 {
            return Err(ImageError::InvalidBatchShape(tensor.shape));
        }
        Ok(Self(tensor))
    }

    /// Create a batch from raw data laid out as (N, 1, H, W).
    ///
    /// # Example
    ///
    /// ```
    /// use scrawl_image::ImageBatch;
    ///
    /// let batch = ImageBatch::new(2, [3, 2].into(), vec![0.0; 2 * 3 * 2]).unwrap();
    /// assert_eq!(batch.batch_size(), 2);
    /// assert_eq!(batch.width(), 3);
    /// assert_eq!(batch.height(), 2);
    /// ```
    pub fn new(batch_size: usize, size: ImageSize, data: Vec<f32>) -> Result<Self, ImageError> {
        let shape = [batch_size, 1, size.height, size.width];
        Self::from_tensor(Tensor4::from_shape_vec(shape, data)?)
    }

    /// Create a batch with every pixel set to `val`.
    pub fn from_size_val(batch_size: usize, size: ImageSize, val: f32) -> Result<Self, ImageError> {
        let shape = [batch_size, 1, size.height, size.width];
        Self::from_tensor(Tensor4::from_shape_val(shape, val))
    }

    /// Create a batch of one from a single-channel image.
    pub fn from_image(image: &Image<f32, 1>) -> Result<Self, ImageError> {
        Self::new(1, image.size(), image.as_slice().to_vec())
    }

    /// Stack equally sized single-channel images into a batch.
    ///
    /// # Errors
    ///
    /// Fails on an empty slice or when the image sizes differ.
    pub fn from_images(images: &[Image<f32, 1>]) -> Result<Self, ImageError> {
        let Some(first) = images.first() else {
            return Err(ImageError::InvalidBatchShape([0, 1, 0, 0]));
        };
        let size = first.size();

        let mut data = Vec::with_capacity(images.len() * size.area());
        for image in images {
            if image.size() != size {
                return Err(ImageError::InvalidImageSize(
                    image.width(),
                    image.height(),
                    size.width,
                    size.height,
                ));
            }
            data.extend_from_slice(image.as_slice());
        }

        Self::new(images.len(), size, data)
    }

    /// Number of images in the batch.
    pub fn batch_size(&self) -> usize {
        self.0.shape[0]
    }

    /// Height of every image in the batch.
    pub fn height(&self) -> usize {
        self.0.shape[2]
    }

    /// Width of every image in the batch.
    pub fn width(&self) -> usize {
        self.0.shape[3]
    }

    /// Size of every image in the batch.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Pixel data of the `index`-th image, row-major.
    pub fn plane(&self, index: usize) -> Result<&[f32], ImageError> {
        if index >= self.batch_size() {
            return Err(ImageError::BatchIndexOutOfBounds(index, self.batch_size()));
        }
        let area = self.size().area();
        Ok(&self.0.as_slice()[index * area..(index + 1) * area])
    }

    /// Iterate over the image planes in batch order.
    pub fn planes(&self) -> std::slice::ChunksExact<'_, f32> {
        self.0.as_slice().chunks_exact(self.size().area())
    }

    /// Mutable pixel data of the whole batch.
    pub fn as_slice_mut(&mut self) -> &mut [f32] {
        self.0.as_slice_mut()
    }

    /// Copy the `index`-th image out of the batch.
    pub fn image(&self, index: usize) -> Result<Image<f32, 1>, ImageError> {
        Image::new(self.size(), self.plane(index)?.to_vec())
    }

    /// Split the batch into owned images.
    pub fn into_images(self) -> Result<Vec<Image<f32, 1>>, ImageError> {
        let size = self.size();
        self.planes()
            .map(|plane| Image::new(size, plane.to_vec()))
            .collect()
    }

    /// Apply a function to every pixel, producing a new batch.
    pub fn map(&self, f: impl Fn(&f32) -> f32) -> Self {
        Self(self.0.map(f))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Image, ImageBatch, ImageError};
    use scrawl_tensor::Tensor4;

    #[test]
    fn batch_from_images() -> Result<(), ImageError> {
        let a = Image::<f32, 1>::from_size_val([3, 2].into(), 0.25);
        let b = Image::<f32, 1>::from_size_val([3, 2].into(), 0.75);

        let batch = ImageBatch::from_images(&[a.clone(), b])?;
        assert_eq!(batch.shape, [2, 1, 2, 3]);
        assert_eq!(batch.plane(1)?, &[0.75; 6]);
        assert_eq!(batch.image(0)?, a);
        assert!(batch.plane(2).is_err());
        Ok(())
    }

    #[test]
    fn batch_rejects_mismatched_sizes() {
        let a = Image::<f32, 1>::from_size_val([3, 2].into(), 0.0);
        let b = Image::<f32, 1>::from_size_val([2, 3].into(), 0.0);
        assert!(ImageBatch::from_images(&[a, b]).is_err());
        assert!(ImageBatch::from_images(&[]).is_err());
    }

    #[test]
    fn batch_rejects_bad_layout() {
        let t = Tensor4::<f32>::zeros([1, 3, 4, 4]);
        assert_eq!(
            ImageBatch::from_tensor(t),
            Err(ImageError::InvalidBatchShape([1, 3, 4, 4]))
        );
        let t = Tensor4::<f32>::zeros([1, 1, 0, 4]);
        assert!(ImageBatch::from_tensor(t).is_err());
    }

    #[test]
    fn batch_into_images() -> Result<(), ImageError> {
        let batch = ImageBatch::new(2, [2, 1].into(), vec![1.0, 2.0, 3.0, 4.0])?;
        let images = batch.into_images()?;
        assert_eq!(images.len(), 2);
        assert_eq!(images[1].as_slice(), &[3.0, 4.0]);
        Ok(())
    }
}
