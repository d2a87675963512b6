use std::path::{Path, PathBuf};

use scrawl_image::Image;

use crate::error::DataError;

/// Turns an index path into an inverted intensity image.
pub trait ImageDecoder {
    /// Decode the image behind `path`.
    fn decode(&self, path: &Path) -> Result<Image<f32, 1>, DataError>;
}

/// Decodes mono8 PNG files, appending `.png` to the index path.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngDecoder;

impl PngDecoder {
    /// The file actually read for an index path.
    pub fn file_path(path: &Path) -> PathBuf {
        let mut file = path.as_os_str().to_owned();
        file.push(".png");
        PathBuf::from(file)
    }
}

impl ImageDecoder for PngDecoder {
    fn decode(&self, path: &Path) -> Result<Image<f32, 1>, DataError> {
        Ok(scrawl_io::png::read_image_inverted(Self::file_path(path))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrawl_io::png::write_image_png_mono8;

    #[test]
    fn decode_appends_extension() -> Result<(), DataError> {
        let tmp_dir = tempfile::tempdir()?;
        let stem = tmp_dir.path().join("a01-000u-00-00");

        let raw = Image::<u8, 1>::new([2, 1].into(), vec![255, 0])?;
        write_image_png_mono8(PngDecoder::file_path(&stem), &raw)?;

        let image = PngDecoder.decode(&stem)?;
        assert_eq!(image.as_slice(), &[0.0, 1.0]);
        Ok(())
    }
}
