pub mod circle;
pub mod config;
pub mod hough;
pub mod hull;
pub mod sun;

pub use circle::{Circle, CircleFinder};
pub use config::DetectionParameters;
pub use hough::HoughGradient;
pub use sun::{
    annotate_circles, classify, detect_circles, detect_sun, min_edge_distance, DetectionResult,
    SunDetection,
};
