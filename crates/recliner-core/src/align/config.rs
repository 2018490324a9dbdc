use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_OUTPUT_RESIZE_RATIO;
use crate::error::{ReclinerError, Result};

/// Output canvas and scaling for aligned photos.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlignmentSpec {
    /// Canvas width; derived from the detected geometry when `None`.
    #[serde(default)]
    pub width: Option<u32>,
    /// Canvas height; derived from the detected geometry when `None`.
    #[serde(default)]
    pub height: Option<u32>,
    /// Scale applied to the crop, in (0, 1].
    #[serde(default = "default_resize_ratio")]
    pub resize_ratio: f64,
}

fn default_resize_ratio() -> f64 {
    DEFAULT_OUTPUT_RESIZE_RATIO
}

impl Default for AlignmentSpec {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            resize_ratio: DEFAULT_OUTPUT_RESIZE_RATIO,
        }
    }
}

impl AlignmentSpec {
    pub fn validate(&self) -> Result<()> {
        if !(self.resize_ratio > 0.0 && self.resize_ratio <= 1.0) {
            return Err(ReclinerError::InvalidParameters(format!(
                "output resize ratio must be in (0, 1], got {}",
                self.resize_ratio
            )));
        }
        if self.width == Some(0) || self.height == Some(0) {
            return Err(ReclinerError::InvalidParameters(
                "output canvas dimensions must be positive".into(),
            ));
        }
        Ok(())
    }
}
