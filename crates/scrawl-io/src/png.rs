use std::{fs, fs::File, path::Path};

use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use scrawl_image::{Image, ImageSize};

use crate::error::IoError;

/// Read a PNG image with a single channel (mono8).
///
/// Grayscale images with less than 8 bits per pixel are expanded to 8 bits.
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file.
///
/// # Returns
///
/// A grayscale image with a single channel (mono8).
///
/// # Errors
///
/// Fails if the file is missing, is not a `.png`, cannot be decoded or is not 8-bit
/// grayscale once expanded.
pub fn read_image_png_mono8(file_path: impl AsRef<Path>) -> Result<Image<u8, 1>, IoError> {
    let (buf, size) = read_png_impl(file_path)?;
    Ok(Image::new(size, buf)?)
}

/// Read a mono8 PNG image as inverted intensities in `[0, 1]`.
///
/// Every pixel becomes `1 - raw / 255`, so dark ink on a light page turns into bright
/// strokes on a dark background.
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file.
pub fn read_image_inverted(file_path: impl AsRef<Path>) -> Result<Image<f32, 1>, IoError> {
    let image = read_image_png_mono8(file_path)?;
    Ok(image.map(|&v| 1.0 - v as f32 / 255.0))
}

// utility function to read the png file
fn read_png_impl(file_path: impl AsRef<Path>) -> Result<(Vec<u8>, ImageSize), IoError> {
    // verify the file exists
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // verify the file extension
    match file_path.extension() {
        Some(extension) if extension.eq_ignore_ascii_case("png") => {}
        _ => return Err(IoError::InvalidFileExtension(file_path.to_path_buf())),
    }

    let file = fs::File::open(file_path)?;
    let mut decoder = Decoder::new(file);
    decoder.set_transformations(Transformations::EXPAND);

    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;

    if info.color_type != ColorType::Grayscale || info.bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedPixelFormat(format!(
            "{:?} {:?}",
            info.color_type, info.bit_depth
        )));
    }

    let size = ImageSize {
        width: info.width as usize,
        height: info.height as usize,
    };
    buf.truncate(info.buffer_size());

    Ok((buf, size))
}

/// Writes the given PNG _(grayscale 8-bit)_ data to the given file path.
///
/// # Arguments
///
/// - `file_path` - The path to the PNG image.
/// - `image` - The image containing the pixel data.
pub fn write_image_png_mono8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 1>,
) -> Result<(), IoError> {
    write_png_impl(file_path, image.as_slice(), image.size())
}

/// Writes an inverted `[0, 1]` image as a grayscale 8-bit PNG.
///
/// This is the reverse of [`read_image_inverted`]: pixels are clamped to `[0, 1]` and
/// stored as `round((1 - v) * 255)`.
pub fn write_image_inverted(
    file_path: impl AsRef<Path>,
    image: &Image<f32, 1>,
) -> Result<(), IoError> {
    let raw = image.map(|&v| ((1.0 - v.clamp(0.0, 1.0)) * 255.0).round() as u8);
    write_image_png_mono8(file_path, &raw)
}

fn write_png_impl(
    file_path: impl AsRef<Path>,
    image_data: &[u8],
    image_size: ImageSize,
) -> Result<(), IoError> {
    let file = File::create(file_path)?;

    let mut encoder = Encoder::new(file, image_size.width as u32, image_size.height as u32);
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .write_image_data(image_data)
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_read_png_mono8() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("word.png");

        let data = (0..12).map(|i| (i * 20) as u8).collect();
        let image = Image::<u8, 1>::new([4, 3].into(), data)?;
        write_image_png_mono8(&file_path, &image)?;

        let image_back = read_image_png_mono8(&file_path)?;
        assert_eq!(image_back.size(), image.size());
        assert_eq!(image_back.as_slice(), image.as_slice());
        Ok(())
    }

    #[test]
    fn written_png_is_complete() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("line.png");

        let image = Image::<u8, 1>::new([5, 2].into(), vec![7; 10])?;
        write_image_png_mono8(&file_path, &image)?;

        // the file ends with the IEND chunk: zero length, tag and fixed crc
        let bytes = fs::read(&file_path)?;
        assert_eq!(
            &bytes[bytes.len() - 12..],
            &[0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]
        );
        Ok(())
    }

    #[test]
    fn read_inverted() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("page.png");

        let image = Image::<u8, 1>::new([3, 1].into(), vec![0, 255, 51])?;
        write_image_png_mono8(&file_path, &image)?;

        let inverted = read_image_inverted(&file_path)?;
        assert_eq!(inverted.as_slice()[0], 1.0);
        assert_eq!(inverted.as_slice()[1], 0.0);
        assert!((inverted.as_slice()[2] - 0.8).abs() < 1e-6);

        let out_path = tmp_dir.path().join("page-out.png");
        write_image_inverted(&out_path, &inverted)?;
        assert_eq!(read_image_png_mono8(&out_path)?.as_slice(), &[0, 255, 51]);
        Ok(())
    }

    #[test]
    fn missing_file_and_bad_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;

        let missing = tmp_dir.path().join("missing.png");
        assert!(matches!(
            read_image_png_mono8(&missing),
            Err(IoError::FileDoesNotExist(_))
        ));

        let text = tmp_dir.path().join("notes.txt");
        fs::write(&text, b"not an image")?;
        assert!(matches!(
            read_image_png_mono8(&text),
            Err(IoError::InvalidFileExtension(_))
        ));

        let garbage = tmp_dir.path().join("garbage.png");
        fs::write(&garbage, b"not an image")?;
        assert!(matches!(
            read_image_png_mono8(&garbage),
            Err(IoError::PngDecodeError(_))
        ));
        Ok(())
    }

    #[test]
    fn rejects_color_png() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("rgb.png");

        let file = File::create(&file_path)?;
        let mut encoder = Encoder::new(file, 2, 1);
        encoder.set_color(ColorType::Rgb);
        encoder.set_depth(BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
        writer
            .write_image_data(&[0, 0, 0, 255, 255, 255])
            .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| IoError::PngEncodingError(e.to_string()))?;

        assert!(matches!(
            read_image_png_mono8(&file_path),
            Err(IoError::UnsupportedPixelFormat(_))
        ));
        Ok(())
    }
}
