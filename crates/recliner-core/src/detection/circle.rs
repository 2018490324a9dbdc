use image::GrayImage;

use super::config::DetectionParameters;

/// A circle found in an image, in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Accumulator votes received by the center.
    pub votes: u32,
}

impl Circle {
    /// Center and radius rounded to whole pixels, ties to even.
    /// Negative coordinates clamp to zero.
    pub fn rounded(&self) -> ((u32, u32), u32) {
        let round = |v: f32| v.round_ties_even().max(0.0) as u32;
        ((round(self.x), round(self.y)), round(self.radius))
    }
}

/// Finds circles in a grayscale image.
///
/// Implementations return circles strongest first.
pub trait CircleFinder: Send + Sync {
    fn find_circles(&self, gray: &GrayImage, params: &DetectionParameters) -> Vec<Circle>;
}
