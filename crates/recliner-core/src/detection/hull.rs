//! Convex-hull preprocessing for partially eclipsed suns.
//!
//! A crescent has no circular gradient pattern along its inner edge, but the
//! convex hull of the bright region is close to the full solar disc.

use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType};
use imageproc::drawing::draw_polygon_mut;
use imageproc::geometry::convex_hull;
use imageproc::point::Point;

/// Result of filling the convex hull of the bright region.
#[derive(Clone, Debug)]
pub enum HullMask {
    /// Exactly one bright region; its filled convex hull, white on black.
    Filled(GrayImage),
    /// Nothing above the threshold; an all-black mask.
    Empty(GrayImage),
    /// Several separate bright regions; raise the threshold.
    Multiple(usize),
}

/// Binarize `gray` at `threshold` (strictly brighter pixels are foreground)
/// and fill the convex hull of the single outer contour.
pub fn convex_hull_mask(gray: &GrayImage, threshold: u8) -> HullMask {
    let (w, h) = gray.dimensions();
    let mut binary = gray.clone();
    for pixel in binary.pixels_mut() {
        pixel.0[0] = if pixel.0[0] > threshold { 255 } else { 0 };
    }

    let outer: Vec<_> = find_contours::<i32>(&binary)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .collect();

    let mut mask = GrayImage::new(w, h);
    match outer.as_slice() {
        [] => HullMask::Empty(mask),
        [contour] => {
            let hull: Vec<Point<i32>> = convex_hull(&contour.points[..]);
            if hull.len() >= 3 {
                draw_polygon_mut(&mut mask, &hull, Luma([255]));
            } else {
                for p in &hull {
                    mask.put_pixel(p.x as u32, p.y as u32, Luma([255]));
                }
            }
            HullMask::Filled(mask)
        }
        many => HullMask::Multiple(many.len()),
    }
}
