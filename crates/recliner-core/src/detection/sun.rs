use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::consts::{ANNOTATION_CENTER_DOT_RADIUS, ANNOTATION_OUTLINE_THICKNESS};
use crate::photo::Photo;

use super::circle::{Circle, CircleFinder};
use super::config::DetectionParameters;
use super::hull::{convex_hull_mask, HullMask};

const OUTLINE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const CENTER_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// The single Sun found in a photo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunDetection {
    /// Center `(x, y)` in whole pixels.
    pub center: (u32, u32),
    /// Radius in whole pixels.
    pub radius: u32,
    /// Distance from the center to the nearest image edge; `None` when the
    /// center is not strictly inside the image.
    pub min_edge_distance: Option<u32>,
}

/// Outcome of looking for the Sun in one photo.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetectionResult {
    NoneFound,
    /// More than one circle; never used for alignment or statistics.
    Ambiguous(usize),
    Found(SunDetection),
}

/// Smallest distance from `center` to an image edge, defined only when the
/// center lies strictly inside the `width` x `height` image.
pub fn min_edge_distance(center: (u32, u32), width: u32, height: u32) -> Option<u32> {
    let (x, y) = center;
    if x > 0 && y > 0 && x < width && y < height {
        Some(x.min(y).min(width - x).min(height - y))
    } else {
        None
    }
}

/// Classify circles found in a `width` x `height` image.
///
/// Exactly one circle is required for a usable result.
pub fn classify(circles: &[Circle], width: u32, height: u32) -> DetectionResult {
    match circles {
        [] => DetectionResult::NoneFound,
        [circle] => {
            let (center, radius) = circle.rounded();
            DetectionResult::Found(SunDetection {
                center,
                radius,
                min_edge_distance: min_edge_distance(center, width, height),
            })
        }
        many => DetectionResult::Ambiguous(many.len()),
    }
}

/// Run circle finding on the grayscale photo, or on its convex-hull mask
/// when `params.convex_threshold` is set.
pub fn detect_circles(
    photo: &Photo,
    params: &DetectionParameters,
    finder: &dyn CircleFinder,
) -> Vec<Circle> {
    let gray = photo.gray();
    let target = match params.convex_threshold {
        None => gray,
        Some(threshold) => match convex_hull_mask(&gray, threshold) {
            HullMask::Filled(mask) | HullMask::Empty(mask) => mask,
            HullMask::Multiple(count) => {
                warn!(
                    photo = %photo.path.display(),
                    regions = count,
                    "Several bright regions found; consider a higher convex threshold"
                );
                gray
            }
        },
    };
    finder.find_circles(&target, params)
}

/// Look for the Sun in `photo`, logging a warning when none or several
/// circles are found.
pub fn detect_sun(
    photo: &Photo,
    params: &DetectionParameters,
    finder: &dyn CircleFinder,
) -> DetectionResult {
    let circles = detect_circles(photo, params, finder);
    let result = classify(&circles, photo.width(), photo.height());
    log_detection(photo, &result);
    result
}

pub(crate) fn log_detection(photo: &Photo, result: &DetectionResult) {
    match result {
        DetectionResult::NoneFound => warn!(
            photo = %photo.path.display(),
            "No Sun detected; consider rerunning with different parameters"
        ),
        DetectionResult::Ambiguous(count) => warn!(
            photo = %photo.path.display(),
            count,
            "{count} Suns detected; consider rerunning with a larger circle distance"
        ),
        DetectionResult::Found(sun) => debug!(
            photo = %photo.path.display(),
            x = sun.center.0,
            y = sun.center.1,
            radius = sun.radius,
            "Sun found"
        ),
    }
}

/// Copy of `rgb` with every circle outlined and its center marked.
pub fn annotate_circles(rgb: &RgbImage, circles: &[Circle]) -> RgbImage {
    let mut out = rgb.clone();
    for circle in circles {
        let ((x, y), radius) = circle.rounded();
        let center = (x as i32, y as i32);
        let radius = radius as i32;
        for offset in 0..ANNOTATION_OUTLINE_THICKNESS {
            let r = radius + offset - ANNOTATION_OUTLINE_THICKNESS / 2;
            if r > 0 {
                draw_hollow_circle_mut(&mut out, center, r, OUTLINE_COLOR);
            }
        }
        draw_filled_circle_mut(&mut out, center, ANNOTATION_CENTER_DOT_RADIUS, CENTER_COLOR);
    }
    out
}
