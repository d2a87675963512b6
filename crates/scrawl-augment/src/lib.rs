#![deny(missing_docs)]
//! Random augmentation of handwriting images.
//!
//! Every image of a batch goes through an optional morphological operator
//! with a random kernel size and mode, followed by a random rotation and
//! slant. All the randomness is drawn from a caller provided
//! [`RandomSource`], so seeded runs are reproducible and tests can script
//! the draws.
//!
//! ```no_run
//! use rand::SeedableRng;
//! use scrawl_augment::{augment, RngSource};
//! use scrawl_image::ImageBatch;
//!
//! let batch = ImageBatch::from_size_val(4, [128, 32].into(), 0.0).unwrap();
//! let mut rng = RngSource::new(rand::rngs::StdRng::seed_from_u64(42));
//! let augmented = augment(&batch, &mut rng).unwrap();
//! assert_eq!(augmented.shape, batch.shape);
//! ```

mod config;
mod error;
mod pipeline;
mod random;

pub use config::AugmentConfig;
pub use error::AugmentError;
pub use pipeline::{affine_warp, augment, Augmenter};
pub use random::{RandomSource, RngSource};
