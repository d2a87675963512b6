use scrawl_image::Image;

use crate::decoder::ImageDecoder;
use crate::error::DataError;
use crate::index::SampleIndex;
use crate::split::{Level, Split};

/// Interval, in entries, between two progress messages.
const PROGRESS_INTERVAL: usize = 1000;

/// A decoded image with its transcription.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// The inverted intensity image.
    pub image: Image<f32, 1>,
    /// The transcription, words separated by spaces.
    pub transcription: String,
}

/// Decode every entry of a split.
///
/// Word separators encoded as `|` in the transcriptions are replaced by spaces. Entries
/// whose image fails to decode are skipped; the number of skipped entries is logged once
/// at the end.
///
/// # Errors
///
/// Only a failure of the index itself is returned. Decoding failures are never fatal.
pub fn build_samples(
    index: &impl SampleIndex,
    decoder: &impl ImageDecoder,
    split: Split,
    level: Level,
) -> Result<Vec<Sample>, DataError> {
    let entries = index.entries(split, level)?;
    let total = entries.len();

    let mut samples = Vec::with_capacity(total);
    let mut skipped = 0;

    for (i, entry) in entries.into_iter().enumerate() {
        if i % PROGRESS_INTERVAL == 0 {
            log::info!(
                "{split}/{level}: [{i}/{total} ({:.0}%)]",
                100.0 * i as f64 / total as f64
            );
        }

        match decoder.decode(&entry.image_path) {
            Ok(image) => samples.push(Sample {
                image,
                transcription: entry.transcription.replace('|', " "),
            }),
            Err(err) => {
                log::debug!("skipping {}: {err}", entry.image_path.display());
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        log::warn!("{split}/{level}: skipped {skipped} of {total} samples that failed to decode");
    }

    Ok(samples)
}
