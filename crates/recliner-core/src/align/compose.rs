use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::detection::SunDetection;
use crate::error::Result;
use crate::photo::Photo;

use super::config::AlignmentSpec;
use super::geometry::CropGeometry;

/// Crop `photo` around the detected Sun, resize the crop and paste it
/// centered on a black canvas.
pub fn align_photo(photo: &Photo, sun: &SunDetection, spec: &AlignmentSpec) -> Result<RgbImage> {
    let geometry = CropGeometry::compute(sun, spec)?;
    compose(&photo.rgb, &geometry)
}

/// Apply precomputed crop geometry to an RGB image.
pub fn compose(rgb: &RgbImage, geometry: &CropGeometry) -> Result<RgbImage> {
    let (x0, y0) = geometry.crop_origin(rgb.width(), rgb.height())?;
    let (paste_x, paste_y) = geometry.paste_offset()?;

    let size = geometry.crop_size();
    let crop = imageops::crop_imm(rgb, x0, y0, size, size).to_image();

    let resized_size = geometry.resized_size();
    let resized = if resized_size == size {
        crop
    } else {
        imageops::resize(&crop, resized_size, resized_size, FilterType::Triangle)
    };

    let mut canvas = RgbImage::new(geometry.canvas_width, geometry.canvas_height);
    imageops::replace(&mut canvas, &resized, i64::from(paste_x), i64::from(paste_y));
    Ok(canvas)
}
