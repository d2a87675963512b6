#![deny(missing_docs)]
//! Loading handwriting samples for training.
//!
//! A [`SampleIndex`] lists the `(image path, transcription)` pairs of a split,
//! an [`ImageDecoder`] turns each path into an inverted intensity image and
//! [`build_samples`] puts the two together. The resulting list is cached on
//! disk by [`SampleCache`] and served, resized, by [`WordDataset`].

mod cache;
mod dataset;
mod decoder;
mod error;
mod index;
mod samples;
mod split;

pub use cache::SampleCache;
pub use dataset::{DatasetConfig, WordDataset};
pub use decoder::{ImageDecoder, PngDecoder};
pub use error::DataError;
pub use index::{IndexEntry, ManifestIndex, SampleIndex, VecIndex};
pub use samples::{build_samples, Sample};
pub use split::{Level, Split};
