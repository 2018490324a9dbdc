//! Gradient Hough transform for circles.
//!
//! Every Canny edge pixel votes along both directions of its gradient at each
//! radius in `[min_radius, max_radius]`. Circle centers show up as local
//! maxima of the accumulator because the gradients of a circular boundary
//! all point through its center. Each accepted center then gets the radius
//! most edge pixels agree on, and is refined with a least-squares circle fit.

use image::GrayImage;
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use imageproc::gradients::{horizontal_sobel, vertical_sobel};
use ndarray::Array2;

use crate::consts::{HOUGH_GRADIENT_BLUR_SIGMA, HOUGH_MIN_GRADIENT, HOUGH_RADIUS_BAND};

use super::circle::{Circle, CircleFinder};
use super::config::DetectionParameters;

/// Edge pixels farther than this from the voted radius are left out of the
/// least-squares refinement.
const FIT_BAND: f32 = 2.0;

/// Minimum number of edge pixels for a least-squares refinement.
const FIT_MIN_POINTS: usize = 8;

/// Gradient Hough circle finder.
#[derive(Clone, Copy, Debug, Default)]
pub struct HoughGradient;

/// An edge pixel with its unit gradient direction.
#[derive(Clone, Copy, Debug)]
struct EdgePoint {
    x: f32,
    y: f32,
    dx: f32,
    dy: f32,
}

impl CircleFinder for HoughGradient {
    fn find_circles(&self, gray: &GrayImage, params: &DetectionParameters) -> Vec<Circle> {
        let (w, h) = gray.dimensions();
        if w < 3 || h < 3 || params.min_radius > params.max_radius {
            return Vec::new();
        }

        let points = edge_points(gray, params.param1);
        if points.is_empty() {
            return Vec::new();
        }

        let accum = accumulate_votes(&points, w as usize, h as usize, params);
        let candidates = center_candidates(&accum, params.param2);
        select_circles(&accum, &candidates, &points, params)
    }
}

/// Canny edge pixels paired with Sobel gradient directions of the smoothed image.
fn edge_points(gray: &GrayImage, param1: f32) -> Vec<EdgePoint> {
    let edges = canny(gray, param1 / 2.0, param1);
    let smoothed = gaussian_blur_f32(gray, HOUGH_GRADIENT_BLUR_SIGMA);
    let gx = horizontal_sobel(&smoothed);
    let gy = vertical_sobel(&smoothed);

    edges
        .enumerate_pixels()
        .filter(|(_, _, edge)| edge.0[0] > 0)
        .filter_map(|(x, y, _)| {
            let dx = f32::from(gx.get_pixel(x, y).0[0]);
            let dy = f32::from(gy.get_pixel(x, y).0[0]);
            let mag = (dx * dx + dy * dy).sqrt();
            (mag >= HOUGH_MIN_GRADIENT).then(|| EdgePoint {
                x: x as f32,
                y: y as f32,
                dx: dx / mag,
                dy: dy / mag,
            })
        })
        .collect()
}

/// Full-resolution center accumulator, indexed `[row, col]`.
fn accumulate_votes(
    points: &[EdgePoint],
    width: usize,
    height: usize,
    params: &DetectionParameters,
) -> Array2<u32> {
    let mut accum = Array2::<u32>::zeros((height, width));
    let min_r = params.min_radius.max(1);

    for p in points {
        for r in min_r..=params.max_radius {
            let r = r as f32;
            for sign in [1.0_f32, -1.0] {
                let cx = (p.x + sign * p.dx * r).round();
                let cy = (p.y + sign * p.dy * r).round();
                if cx < 0.0 || cy < 0.0 {
                    continue;
                }
                let (col, row) = (cx as usize, cy as usize);
                if col < width && row < height {
                    accum[[row, col]] += 1;
                }
            }
        }
    }

    accum
}

/// Local accumulator maxima with at least `threshold` votes, as
/// `(row, col, votes)` sorted by votes descending.
fn center_candidates(accum: &Array2<u32>, threshold: u32) -> Vec<(usize, usize, u32)> {
    let (h, w) = accum.dim();
    let mut candidates = Vec::new();

    for row in 1..h.saturating_sub(1) {
        for col in 1..w.saturating_sub(1) {
            let v = accum[[row, col]];
            // Strict on one side, non-strict on the other, so a plateau
            // yields a single maximum.
            if v >= threshold
                && v > accum[[row, col - 1]]
                && v >= accum[[row, col + 1]]
                && v > accum[[row - 1, col]]
                && v >= accum[[row + 1, col]]
            {
                candidates.push((row, col, v));
            }
        }
    }

    candidates.sort_unstable_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)).then(a.1.cmp(&b.1)));
    candidates
}

/// Accept candidates strongest first, skipping any closer than
/// `min_distance` to an accepted circle or without enough radius support.
fn select_circles(
    accum: &Array2<u32>,
    candidates: &[(usize, usize, u32)],
    points: &[EdgePoint],
    params: &DetectionParameters,
) -> Vec<Circle> {
    let min_dist_sq = params.min_distance * params.min_distance;
    let mut circles: Vec<Circle> = Vec::new();

    for &(row, col, votes) in candidates {
        let (cx, cy) = refine_center(accum, row, col);
        let too_close = circles
            .iter()
            .any(|c| (c.x - cx).powi(2) + (c.y - cy).powi(2) < min_dist_sq);
        if too_close {
            continue;
        }

        let Some((radius, support)) = best_radius(points, cx, cy, params) else {
            continue;
        };
        if support < params.param2 {
            continue;
        }

        let (x, y, radius) = fit_circle(points, cx, cy, radius, params).unwrap_or((cx, cy, radius));
        circles.push(Circle {
            x,
            y,
            radius,
            votes,
        });
    }

    circles
}

/// Vote-weighted centroid of the 3x3 neighborhood around a peak, as `(x, y)`.
fn refine_center(accum: &Array2<u32>, row: usize, col: usize) -> (f32, f32) {
    let (h, w) = accum.dim();
    let mut sum_x = 0.0_f64;
    let mut sum_y = 0.0_f64;
    let mut sum_w = 0.0_f64;

    for r in row.saturating_sub(1)..=(row + 1).min(h - 1) {
        for c in col.saturating_sub(1)..=(col + 1).min(w - 1) {
            let weight = f64::from(accum[[r, c]]);
            sum_x += c as f64 * weight;
            sum_y += r as f64 * weight;
            sum_w += weight;
        }
    }

    if sum_w > 0.0 {
        ((sum_x / sum_w) as f32, (sum_y / sum_w) as f32)
    } else {
        (col as f32, row as f32)
    }
}

/// The integer radius in range supported by the most edge pixels, with its
/// support count. Ties go to the smaller radius.
fn best_radius(
    points: &[EdgePoint],
    cx: f32,
    cy: f32,
    params: &DetectionParameters,
) -> Option<(f32, u32)> {
    let (min_r, max_r) = (params.min_radius, params.max_radius);
    let mut support = vec![0u32; (max_r - min_r + 1) as usize];
    let lo = min_r as f32 - HOUGH_RADIUS_BAND;
    let hi = max_r as f32 + HOUGH_RADIUS_BAND;

    for p in points {
        let d = ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt();
        if d < lo || d >= hi {
            continue;
        }
        let bin = (d.round() as u32).clamp(min_r, max_r) - min_r;
        support[bin as usize] += 1;
    }

    support
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
        .filter(|&(_, &count)| count > 0)
        .map(|(i, &count)| ((min_r + i as u32) as f32, count))
}

/// Least-squares (Kasa) circle fit over the edge pixels near the voted
/// circle. Returns `None` when the fit is degenerate or leaves the radius range.
fn fit_circle(
    points: &[EdgePoint],
    cx: f32,
    cy: f32,
    radius: f32,
    params: &DetectionParameters,
) -> Option<(f32, f32, f32)> {
    let near: Vec<(f64, f64)> = points
        .iter()
        .filter(|p| {
            let d = ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt();
            (d - radius).abs() <= FIT_BAND
        })
        .map(|p| (f64::from(p.x), f64::from(p.y)))
        .collect();
    if near.len() < FIT_MIN_POINTS {
        return None;
    }

    // Work relative to the mean for conditioning.
    let n = near.len() as f64;
    let mx = near.iter().map(|p| p.0).sum::<f64>() / n;
    let my = near.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut suu, mut svv, mut suv) = (0.0_f64, 0.0_f64, 0.0_f64);
    let (mut suuu, mut svvv, mut suvv, mut svuu) = (0.0_f64, 0.0_f64, 0.0_f64, 0.0_f64);
    for &(x, y) in &near {
        let u = x - mx;
        let v = y - my;
        suu += u * u;
        svv += v * v;
        suv += u * v;
        suuu += u * u * u;
        svvv += v * v * v;
        suvv += u * v * v;
        svuu += v * u * u;
    }

    let det = suu * svv - suv * suv;
    if det.abs() < f64::EPSILON {
        return None;
    }
    let b1 = 0.5 * (suuu + suvv);
    let b2 = 0.5 * (svvv + svuu);
    let uc = (b1 * svv - b2 * suv) / det;
    let vc = (suu * b2 - suv * b1) / det;
    let r = (uc * uc + vc * vc + (suu + svv) / n).sqrt();

    let in_range = r.is_finite()
        && r >= f64::from(params.min_radius) - f64::from(HOUGH_RADIUS_BAND)
        && r < f64::from(params.max_radius) + f64::from(HOUGH_RADIUS_BAND);
    in_range.then(|| ((uc + mx) as f32, (vc + my) as f32, r as f32))
}
