use crate::detection::SunDetection;
use crate::error::{ReclinerError, Result};

use super::config::AlignmentSpec;

/// Crop-and-recenter arithmetic for one detected Sun.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CropGeometry {
    /// Sun center `(x, y)` in the source photo.
    pub center: (u32, u32),
    /// Half the side of the square crop taken around the center.
    pub half_extent: u32,
    /// Half the side of the crop after resizing.
    pub resized_half_extent: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl CropGeometry {
    /// Size the crop so it fits both inside the source photo (bounded by the
    /// center's distance to the nearest edge) and inside the requested canvas.
    pub fn compute(sun: &SunDetection, spec: &AlignmentSpec) -> Result<CropGeometry> {
        let mle = sun.min_edge_distance.ok_or_else(|| {
            ReclinerError::Geometry(format!(
                "Sun center ({}, {}) is not inside the photo",
                sun.center.0, sun.center.1
            ))
        })?;

        let half_extent = [Some(mle), spec.width.map(|w| w / 2), spec.height.map(|h| h / 2)]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(mle);
        if half_extent == 0 {
            return Err(ReclinerError::Geometry("crop window is empty".into()));
        }

        let resized_half_extent = (f64::from(half_extent) * spec.resize_ratio).floor() as u32;
        if resized_half_extent == 0 {
            return Err(ReclinerError::Geometry(format!(
                "resize ratio {} shrinks the {}px crop to nothing",
                spec.resize_ratio,
                2 * half_extent
            )));
        }

        Ok(CropGeometry {
            center: sun.center,
            half_extent,
            resized_half_extent,
            canvas_width: spec.width.unwrap_or(2 * mle),
            canvas_height: spec.height.unwrap_or(2 * mle),
        })
    }

    /// Side of the square crop taken from the source.
    pub fn crop_size(&self) -> u32 {
        2 * self.half_extent
    }

    /// Side of the square crop after resizing.
    pub fn resized_size(&self) -> u32 {
        2 * self.resized_half_extent
    }

    /// Top-left corner `(x, y)` of the crop window, checked against a
    /// `width` x `height` source.
    pub fn crop_origin(&self, width: u32, height: u32) -> Result<(u32, u32)> {
        let (x, y) = self.center;
        let out_of_bounds = || {
            ReclinerError::Geometry(format!(
                "crop window of {}px around ({x}, {y}) exceeds source dimensions ({width}x{height})",
                self.crop_size()
            ))
        };
        let x0 = x.checked_sub(self.half_extent).ok_or_else(out_of_bounds)?;
        let y0 = y.checked_sub(self.half_extent).ok_or_else(out_of_bounds)?;
        if x0 + self.crop_size() > width || y0 + self.crop_size() > height {
            return Err(out_of_bounds());
        }
        Ok((x0, y0))
    }

    /// Top-left corner `(x, y)` at which the resized crop is pasted so that
    /// it is centered on the canvas. Odd leftovers go to the right/bottom.
    pub fn paste_offset(&self) -> Result<(u32, u32)> {
        let too_small = || {
            ReclinerError::Geometry(format!(
                "{}px crop does not fit a {}x{} canvas",
                self.resized_size(),
                self.canvas_width,
                self.canvas_height
            ))
        };
        let x = (self.canvas_width / 2)
            .checked_sub(self.resized_half_extent)
            .ok_or_else(too_small)?;
        let y = (self.canvas_height / 2)
            .checked_sub(self.resized_half_extent)
            .ok_or_else(too_small)?;
        if x + self.resized_size() > self.canvas_width || y + self.resized_size() > self.canvas_height
        {
            return Err(too_small());
        }
        Ok((x, y))
    }
}
