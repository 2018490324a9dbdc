use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_HOUGH_PARAM1, DEFAULT_HOUGH_PARAM2, DEFAULT_MAX_RADIUS, DEFAULT_MIN_CIRCLE_DISTANCE,
    DEFAULT_MIN_RADIUS,
};
use crate::error::{ReclinerError, Result};

/// Circle detection parameters, shared read-only by every worker of a batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionParameters {
    /// Minimum distance (pixels) between the centers of two detected circles.
    #[serde(default = "default_min_distance")]
    pub min_distance: f32,
    /// Smallest radius (pixels) searched for.
    #[serde(default = "default_min_radius")]
    pub min_radius: u32,
    /// Largest radius (pixels) searched for.
    #[serde(default = "default_max_radius")]
    pub max_radius: u32,
    /// Upper Canny threshold; the lower one is half of it.
    #[serde(default = "default_param1")]
    pub param1: f32,
    /// Accumulator votes a center needs to count as a circle.
    #[serde(default = "default_param2")]
    pub param2: u32,
    /// When set, search the filled convex hull of the region brighter than
    /// this level instead of the raw grayscale image.
    #[serde(default)]
    pub convex_threshold: Option<u8>,
}

fn default_min_distance() -> f32 {
    DEFAULT_MIN_CIRCLE_DISTANCE
}
fn default_min_radius() -> u32 {
    DEFAULT_MIN_RADIUS
}
fn default_max_radius() -> u32 {
    DEFAULT_MAX_RADIUS
}
fn default_param1() -> f32 {
    DEFAULT_HOUGH_PARAM1
}
fn default_param2() -> u32 {
    DEFAULT_HOUGH_PARAM2
}

impl Default for DetectionParameters {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_MIN_CIRCLE_DISTANCE,
            min_radius: DEFAULT_MIN_RADIUS,
            max_radius: DEFAULT_MAX_RADIUS,
            param1: DEFAULT_HOUGH_PARAM1,
            param2: DEFAULT_HOUGH_PARAM2,
            convex_threshold: None,
        }
    }
}

impl DetectionParameters {
    pub fn validate(&self) -> Result<()> {
        if !(self.min_distance.is_finite() && self.min_distance > 0.0) {
            return Err(ReclinerError::InvalidParameters(format!(
                "circle distance must be positive, got {}",
                self.min_distance
            )));
        }
        if self.max_radius == 0 {
            return Err(ReclinerError::InvalidParameters(
                "maximum radius must be positive".into(),
            ));
        }
        if self.min_radius > self.max_radius {
            return Err(ReclinerError::InvalidParameters(format!(
                "minimum radius {} exceeds maximum radius {}",
                self.min_radius, self.max_radius
            )));
        }
        if !(self.param1.is_finite() && self.param1 > 0.0) {
            return Err(ReclinerError::InvalidParameters(format!(
                "Hough param1 must be positive, got {}",
                self.param1
            )));
        }
        if self.param2 == 0 {
            return Err(ReclinerError::InvalidParameters(
                "Hough param2 must be positive".into(),
            ));
        }
        Ok(())
    }
}
