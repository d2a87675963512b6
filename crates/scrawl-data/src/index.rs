use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DataError;
use crate::split::{Level, Split};

/// One entry of a dataset index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Path to the image, without the file extension.
    pub image_path: PathBuf,
    /// The raw transcription. Word separators may be encoded as `|`.
    pub transcription: String,
}

impl IndexEntry {
    /// Create an index entry.
    pub fn new(image_path: impl Into<PathBuf>, transcription: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
            transcription: transcription.into(),
        }
    }
}

/// Lists the samples of a dataset partition.
pub trait SampleIndex {
    /// Return the entries of a split at a given level, in a stable order.
    fn entries(&self, split: Split, level: Level) -> Result<Vec<IndexEntry>, DataError>;
}

/// An index held in memory.
#[derive(Debug, Clone, Default)]
pub struct VecIndex {
    entries: HashMap<(Split, Level), Vec<IndexEntry>>,
}

impl VecIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to a split.
    pub fn push(&mut self, split: Split, level: Level, entry: IndexEntry) {
        self.entries.entry((split, level)).or_default().push(entry);
    }
}

impl SampleIndex for VecIndex {
    fn entries(&self, split: Split, level: Level) -> Result<Vec<IndexEntry>, DataError> {
        Ok(self
            .entries
            .get(&(split, level))
            .cloned()
            .unwrap_or_default())
    }
}

/// An index read from tab separated manifest files.
///
/// The entries of a split live in `<dir>/<split>_<level>.tsv`, one
/// `path<TAB>transcription` pair per line. Relative image paths are resolved against
/// `dir`. Blank lines and lines starting with `#` are skipped.
#[derive(Debug, Clone)]
pub struct ManifestIndex {
    dir: PathBuf,
}

impl ManifestIndex {
    /// Create an index over the manifests stored in `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The manifest file of a split.
    pub fn manifest_path(&self, split: Split, level: Level) -> PathBuf {
        self.dir.join(format!("{split}_{level}.tsv"))
    }

    fn parse(&self, path: &Path, contents: &str) -> Result<Vec<IndexEntry>, DataError> {
        let mut entries = Vec::new();
        for (i, line) in contents.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((image_path, transcription)) = line.split_once('\t') else {
                return Err(DataError::ManifestParseError {
                    path: path.to_path_buf(),
                    line: i + 1,
                });
            };
            if image_path.is_empty() {
                return Err(DataError::ManifestParseError {
                    path: path.to_path_buf(),
                    line: i + 1,
                });
            }

            entries.push(IndexEntry::new(self.dir.join(image_path), transcription));
        }
        Ok(entries)
    }
}

impl SampleIndex for ManifestIndex {
    fn entries(&self, split: Split, level: Level) -> Result<Vec<IndexEntry>, DataError> {
        let path = self.manifest_path(split, level);
        let contents = fs::read_to_string(&path)?;
        self.parse(&path, &contents)
    }
}
