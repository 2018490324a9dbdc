#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;

use recliner_core::detection::DetectionParameters;
use recliner_core::io::save_jpeg;

pub const SUN_COLOR: Rgb<u8> = Rgb([235, 225, 200]);

/// Black image with a bright disc for every `(cx, cy, radius)`.
pub fn make_sun_image(width: u32, height: u32, discs: &[(i32, i32, i32)]) -> RgbImage {
    let mut img = RgbImage::new(width, height);
    for &(cx, cy, r) in discs {
        draw_filled_circle_mut(&mut img, (cx, cy), r, SUN_COLOR);
    }
    img
}

/// Write a synthetic sun photo as JPEG and return its path.
pub fn write_sun_jpeg(
    dir: &Path,
    name: &str,
    width: u32,
    height: u32,
    discs: &[(i32, i32, i32)],
) -> PathBuf {
    let path = dir.join(name);
    save_jpeg(&make_sun_image(width, height, discs), &path).unwrap();
    path
}

/// Parameters sized for the small 200px fixtures: radius 40, one disc per photo.
pub fn small_params() -> DetectionParameters {
    DetectionParameters {
        min_distance: 100.0,
        min_radius: 35,
        max_radius: 45,
        param1: 100.0,
        param2: 30,
        convex_threshold: None,
    }
}

/// One disc photo, one blank photo and one photo with two discs.
pub fn write_mixed_batch(dir: &Path) -> Vec<PathBuf> {
    vec![
        write_sun_jpeg(dir, "a_sun.jpg", 200, 200, &[(100, 100, 40)]),
        write_sun_jpeg(dir, "b_blank.jpg", 200, 200, &[]),
        write_sun_jpeg(dir, "c_double.jpg", 400, 200, &[(100, 100, 40), (300, 100, 40)]),
    ]
}

pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
