use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use scrawl_image::{Image, ImageSize};
use scrawl_imgproc::normalize::centered;
use scrawl_imgproc::resize::resize;

use crate::cache::SampleCache;
use crate::decoder::ImageDecoder;
use crate::error::DataError;
use crate::index::SampleIndex;
use crate::samples::Sample;
use crate::split::{Level, Split};

/// Where a dataset lives and how its images are served.
///
/// ```
/// use scrawl_data::{DatasetConfig, Split};
///
/// let config = DatasetConfig::from_json(r#"{"root": "/data/iam", "split": "test"}"#).unwrap();
/// assert_eq!(config.split, Split::Test);
/// assert_eq!(config.fixed_height, 128);
/// assert_eq!(config.fixed_width, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Directory holding the sample cache files.
    pub root: PathBuf,
    /// The partition to load.
    pub split: Split,
    /// The sample granularity.
    pub level: Level,
    /// Height of the served images.
    pub fixed_height: usize,
    /// Width of the served images. When `None` the aspect ratio is kept.
    pub fixed_width: Option<usize>,
    /// Keep the aspect ratio and center the image in `fixed_width` instead of stretching.
    pub center: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("data"),
            split: Split::Train,
            level: Level::Word,
            fixed_height: 128,
            fixed_width: None,
            center: false,
        }
    }
}

impl DatasetConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// An indexable set of handwriting samples.
pub struct WordDataset {
    samples: Vec<Sample>,
    config: DatasetConfig,
}

impl WordDataset {
    /// Open a dataset, reading the sample cache or building it on a miss.
    pub fn open(
        config: DatasetConfig,
        index: &impl SampleIndex,
        decoder: &impl ImageDecoder,
    ) -> Result<Self, DataError> {
        let cache = SampleCache::new(&config.root);
        let samples = cache.load_or_build(index, decoder, config.split, config.level)?;
        log::info!(
            "opened {}/{} with {} samples",
            config.split,
            config.level,
            samples.len()
        );
        Ok(Self::from_samples(samples, config))
    }

    /// Serve an existing list of samples.
    pub fn from_samples(samples: Vec<Sample>, config: DatasetConfig) -> Self {
        Self { samples, config }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the dataset has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The configuration in use.
    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Return the `index`-th image, resized to the configured size, and its transcription.
    ///
    /// # Errors
    ///
    /// Fails with [`DataError::IndexOutOfRange`] past the end of the dataset, or if the
    /// resize fails.
    pub fn get(&self, index: usize) -> Result<(Image<f32, 1>, &str), DataError> {
        let sample = self
            .samples
            .get(index)
            .ok_or(DataError::IndexOutOfRange(index, self.samples.len()))?;

        let height = self.config.fixed_height;
        let image = match self.config.fixed_width {
            Some(width) if self.config.center => {
                let resized = resize(&sample.image, Some(height), None)?;
                centered(&resized, ImageSize { width, height })?
            }
            width => resize(&sample.image, Some(height), width)?,
        };

        Ok((image, sample.transcription.as_str()))
    }
}
