use std::path::{Path, PathBuf};

use image::{GrayImage, RgbImage};

/// A decoded photo together with the path it was read from.
///
/// The pixel buffer is owned by whichever task loaded it and is dropped once
/// that task is done with the photo.
#[derive(Clone, Debug)]
pub struct Photo {
    pub path: PathBuf,
    /// 8-bit RGB pixel data.
    pub rgb: RgbImage,
}

impl Photo {
    pub fn new(path: impl Into<PathBuf>, rgb: RgbImage) -> Self {
        Self {
            path: path.into(),
            rgb,
        }
    }

    pub fn width(&self) -> u32 {
        self.rgb.width()
    }

    pub fn height(&self) -> u32 {
        self.rgb.height()
    }

    /// File name of the photo, used unchanged as the output file name.
    pub fn base_name(&self) -> String {
        base_name(&self.path)
    }

    /// Luminance derivative of the RGB data.
    pub fn gray(&self) -> GrayImage {
        image::imageops::grayscale(&self.rgb)
    }
}

/// Last component of `path` as a string, or the whole path when it has none.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
