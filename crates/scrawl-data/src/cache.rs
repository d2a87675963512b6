use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use bincode::{Decode, Encode};
use scrawl_image::{Image, ImageSize};

use crate::decoder::ImageDecoder;
use crate::error::DataError;
use crate::index::SampleIndex;
use crate::samples::{build_samples, Sample};
use crate::split::{Level, Split};

/// On-disk layout of a cached sample.
#[derive(Encode, Decode)]
struct CachedSample {
    width: usize,
    height: usize,
    pixels: Vec<f32>,
    transcription: String,
}

impl From<&Sample> for CachedSample {
    fn from(sample: &Sample) -> Self {
        Self {
            width: sample.image.width(),
            height: sample.image.height(),
            pixels: sample.image.as_slice().to_vec(),
            transcription: sample.transcription.clone(),
        }
    }
}

impl TryFrom<CachedSample> for Sample {
    type Error = DataError;

    fn try_from(cached: CachedSample) -> Result<Self, Self::Error> {
        let size = ImageSize {
            width: cached.width,
            height: cached.height,
        };
        Ok(Sample {
            image: Image::new(size, cached.pixels)?,
            transcription: cached.transcription,
        })
    }
}

/// A bincode cache of decoded sample lists, one file per split and level.
#[derive(Debug, Clone)]
pub struct SampleCache {
    root: PathBuf,
}

impl SampleCache {
    /// Create a cache storing its files in `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The cache file of a split: `<root>/<split>_<level>.bin`.
    pub fn path(&self, split: Split, level: Level) -> PathBuf {
        self.root.join(format!("{split}_{level}.bin"))
    }

    /// Load the cached samples of a split, or `None` if nothing is cached yet.
    pub fn load(&self, split: Split, level: Level) -> Result<Option<Vec<Sample>>, DataError> {
        let path = self.path(split, level);
        if !path.exists() {
            return Ok(None);
        }

        let mut reader = BufReader::new(File::open(&path)?);
        let cached: Vec<CachedSample> =
            bincode::decode_from_std_read(&mut reader, bincode::config::standard())?;

        log::debug!("loaded {} samples from {}", cached.len(), path.display());

        cached
            .into_iter()
            .map(Sample::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Write the samples of a split to the cache, replacing any previous file.
    pub fn save(&self, split: Split, level: Level, samples: &[Sample]) -> Result<(), DataError> {
        fs::create_dir_all(&self.root)?;
        let path = self.path(split, level);

        let cached = samples.iter().map(CachedSample::from).collect::<Vec<_>>();
        let mut writer = BufWriter::new(File::create(&path)?);
        bincode::encode_into_std_write(&cached, &mut writer, bincode::config::standard())?;
        writer.flush()?;

        log::debug!("saved {} samples to {}", samples.len(), path.display());
        Ok(())
    }

    /// Load the samples of a split from the cache, building and saving them on a miss.
    pub fn load_or_build(
        &self,
        index: &impl SampleIndex,
        decoder: &impl ImageDecoder,
        split: Split,
        level: Level,
    ) -> Result<Vec<Sample>, DataError> {
        if let Some(samples) = self.load(split, level)? {
            return Ok(samples);
        }

        log::info!("no cache for {split}/{level}, decoding the samples");
        let samples = build_samples(index, decoder, split, level)?;
        self.save(split, level, &samples)?;
        Ok(samples)
    }
}
