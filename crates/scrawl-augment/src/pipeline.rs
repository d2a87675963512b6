use scrawl_image::{ImageBatch, ImageSize};
use scrawl_imgproc::morphology::{morphology, MorphologyMode};
use scrawl_imgproc::warp::{warp_affine_grid, AffineParams};

use crate::config::AugmentConfig;
use crate::error::AugmentError;
use crate::random::RandomSource;

/// Random augmentation with a validated configuration.
///
/// Each image of a batch gets its own draws, taken in a fixed order: the kernel radius,
/// the morphology mode (only when the radius is not zero), the rotation and the slant.
#[derive(Debug, Clone, Default)]
pub struct Augmenter {
    config: AugmentConfig,
}

impl Augmenter {
    /// Create an augmenter, validating the configuration.
    pub fn new(config: AugmentConfig) -> Result<Self, AugmentError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &AugmentConfig {
        &self.config
    }

    /// Draw the rotation and slant of one image.
    fn draw_affine(&self, rng: &mut impl RandomSource) -> AffineParams {
        let rotation = (self.config.rotation_std_deg * rng.standard_normal()).to_radians();
        let slant = self.config.slant_std * rng.standard_normal();
        AffineParams { rotation, slant }
    }

    fn warp_plane(
        &self,
        plane: &[f32],
        size: ImageSize,
        params: &AffineParams,
    ) -> Result<ImageBatch, AugmentError> {
        let single = ImageBatch::new(1, size, plane.to_vec())?;
        Ok(warp_affine_grid(&single, params, self.config.slant_strength)?)
    }

    /// Rotate and slant every image of a batch by a random amount.
    ///
    /// The rotation is `rotation_std_deg * N(0, 1)` degrees and the slant
    /// `slant_std * N(0, 1)`. The output has the shape of the input.
    pub fn affine_warp(
        &self,
        src: &ImageBatch,
        rng: &mut impl RandomSource,
    ) -> Result<ImageBatch, AugmentError> {
        let size = src.size();
        let mut data = Vec::with_capacity(src.numel());

        for plane in src.planes() {
            let params = self.draw_affine(rng);
            log::debug!(
                "affine warp: rotation {:.4} rad, slant {:.4}",
                params.rotation,
                params.slant
            );
            data.extend_from_slice(self.warp_plane(plane, size, &params)?.as_slice());
        }

        Ok(ImageBatch::new(src.batch_size(), size, data)?)
    }

    /// Apply a random morphological operator and a random affine warp to every image.
    ///
    /// A radius `r` is drawn from `0..max_kernel_radius`. When it is not zero a mode is
    /// drawn among dilation, erosion, opening and closing, in that order, and applied
    /// with a kernel of size `2r + 1`. The affine warp of [`Augmenter::affine_warp`]
    /// follows unconditionally.
    ///
    /// The returned batch never shares storage with `src`.
    pub fn augment(
        &self,
        src: &ImageBatch,
        rng: &mut impl RandomSource,
    ) -> Result<ImageBatch, AugmentError> {
        let size = src.size();
        let mut data = Vec::with_capacity(src.numel());

        for plane in src.planes() {
            let radius = rng.below(self.config.max_kernel_radius);

            let mut image = ImageBatch::new(1, size, plane.to_vec())?;
            if radius > 0 {
                let mode = MorphologyMode::ALL[rng.below(MorphologyMode::ALL.len())];
                log::debug!("augment: {mode} with kernel {}", 2 * radius + 1);
                image = morphology(&image, 2 * radius + 1, mode)?;
            }

            let params = self.draw_affine(rng);
            log::debug!(
                "augment: rotation {:.4} rad, slant {:.4}",
                params.rotation,
                params.slant
            );
            let warped = warp_affine_grid(&image, &params, self.config.slant_strength)?;
            data.extend_from_slice(warped.as_slice());
        }

        Ok(ImageBatch::new(src.batch_size(), size, data)?)
    }
}

/// Randomly rotate and slant every image of a batch with the default configuration.
///
/// See [`Augmenter::affine_warp`].
pub fn affine_warp(
    src: &ImageBatch,
    rng: &mut impl RandomSource,
) -> Result<ImageBatch, AugmentError> {
    Augmenter::default().affine_warp(src, rng)
}

/// Randomly augment every image of a batch with the default configuration.
///
/// See [`Augmenter::augment`].
pub fn augment(src: &ImageBatch, rng: &mut impl RandomSource) -> Result<ImageBatch, AugmentError> {
    Augmenter::default().augment(src, rng)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use approx::assert_relative_eq;
    use scrawl_imgproc::morphology::dilate;

    /// Replays scripted draws.
    struct Scripted {
        normals: VecDeque<f32>,
        ints: VecDeque<usize>,
    }

    impl Scripted {
        fn new(normals: &[f32], ints: &[usize]) -> Self {
            Self {
                normals: normals.iter().copied().collect(),
                ints: ints.iter().copied().collect(),
            }
        }
    }

    impl RandomSource for Scripted {
        fn standard_normal(&mut self) -> f32 {
            self.normals.pop_front().unwrap_or(0.0)
        }

        fn below(&mut self, _upper: usize) -> usize {
            self.ints.pop_front().unwrap_or(0)
        }
    }

    fn ramp(batch_size: usize, size: ImageSize) -> ImageBatch {
        let numel = batch_size * size.area();
        let data = (0..numel).map(|i| (i % 13) as f32 / 12.0).collect();
        ImageBatch::new(batch_size, size, data).unwrap()
    }

    #[test]
    fn zero_draws_leave_images_untouched() -> Result<(), AugmentError> {
        let src = ramp(2, [16, 8].into());
        let mut rng = Scripted::new(&[0.0; 4], &[]);
        let dst = affine_warp(&src, &mut rng)?;

        assert_eq!(dst.shape, src.shape);
        for (a, b) in dst.iter().zip(src.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-5);
        }
        Ok(())
    }

    #[test]
    fn radius_zero_is_affine_warp() -> Result<(), AugmentError> {
        let src = ramp(3, [20, 10].into());
        let normals = [0.3, -1.1, 1.7, 0.2, -0.4, 0.9];

        let mut rng = Scripted::new(&normals, &[0, 0, 0]);
        let augmented = augment(&src, &mut rng)?;

        let mut rng = Scripted::new(&normals, &[]);
        let warped = affine_warp(&src, &mut rng)?;

        assert_eq!(augmented, warped);
        Ok(())
    }

    #[test]
    fn morphology_draws_mode_in_order() -> Result<(), AugmentError> {
        let src = ramp(1, [12, 9].into());

        // radius 1, mode 0 (dilation), no rotation or slant
        let mut rng = Scripted::new(&[0.0, 0.0], &[1, 0]);
        let augmented = augment(&src, &mut rng)?;

        let dilated = dilate(&src, 3)?;
        for (a, b) in augmented.iter().zip(dilated.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-5);
        }
        Ok(())
    }

    #[test]
    fn draws_are_per_image() -> Result<(), AugmentError> {
        let src = ramp(1, [16, 8].into());
        let twice = ImageBatch::new(2, src.size(), [src.as_slice(), src.as_slice()].concat())?;

        // the second image is slanted, the first one is not
        let mut rng = Scripted::new(&[0.0, 0.0, 0.0, 1.0], &[]);
        let dst = affine_warp(&twice, &mut rng)?;

        assert!(dst.plane(0)? != dst.plane(1)?);
        Ok(())
    }

    #[test]
    fn output_is_detached() -> Result<(), AugmentError> {
        let src = ramp(1, [8, 8].into());
        let mut rng = Scripted::new(&[], &[]);
        let dst = augment(&src, &mut rng)?;
        assert_ne!(dst.as_slice().as_ptr(), src.as_slice().as_ptr());
        Ok(())
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = AugmentConfig {
            max_kernel_radius: 0,
            ..Default::default()
        };
        assert!(Augmenter::new(config).is_err());
    }
}
