use std::fs::File;
use std::io::{BufWriter, Read};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, ImageReader, RgbImage};

use crate::consts::{OUTPUT_JPEG_QUALITY, SNIFF_HEADER_LEN};
use crate::error::Result;
use crate::photo::Photo;

/// Identify the image format of a file from its leading bytes.
///
/// Returns `Ok(None)` when the content matches no known image signature.
pub fn sniff_format(path: &Path) -> Result<Option<ImageFormat>> {
    let mut header = Vec::with_capacity(SNIFF_HEADER_LEN);
    File::open(path)?
        .take(SNIFF_HEADER_LEN as u64)
        .read_to_end(&mut header)?;
    Ok(image::guess_format(&header).ok())
}

/// True when the file content is a JPEG, regardless of its extension.
pub fn is_jpeg(path: &Path) -> bool {
    matches!(sniff_format(path), Ok(Some(ImageFormat::Jpeg)))
}

/// Load a photo as 8-bit RGB. The decoder is chosen from the file content.
pub fn load_photo(path: &Path) -> Result<Photo> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(Photo::new(path, img.to_rgb8()))
}

/// Write an RGB image as JPEG, whatever the extension of `path`.
pub fn save_jpeg(img: &RgbImage, path: &Path) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    let encoder = JpegEncoder::new_with_quality(writer, OUTPUT_JPEG_QUALITY);
    img.write_with_encoder(encoder)?;
    Ok(())
}
