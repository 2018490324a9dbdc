/// Default minimum distance (pixels) between the centers of detected circles.
pub const DEFAULT_MIN_CIRCLE_DISTANCE: f32 = 600.0;

/// Default minimum Sun radius (pixels) searched for.
pub const DEFAULT_MIN_RADIUS: u32 = 275;

/// Default maximum Sun radius (pixels) searched for.
pub const DEFAULT_MAX_RADIUS: u32 = 290;

/// Default upper Canny threshold of the gradient Hough transform.
pub const DEFAULT_HOUGH_PARAM1: f32 = 100.0;

/// Default accumulator threshold of the gradient Hough transform.
pub const DEFAULT_HOUGH_PARAM2: u32 = 30;

/// Default resize ratio applied to the crop before compositing.
pub const DEFAULT_OUTPUT_RESIZE_RATIO: f64 = 1.0;

/// Radius buckets with at most this many photos are listed by path in the
/// dry-run report; such radii are usually mis-detections.
pub const RARE_RADIUS_MAX_COUNT: usize = 5;

/// Value reported for the edge distance of a center on or outside the image border.
pub const EDGE_DISTANCE_UNDEFINED: i64 = -1;

/// Gaussian sigma applied before computing gradient directions for voting.
pub const HOUGH_GRADIENT_BLUR_SIGMA: f32 = 1.5;

/// Half-width (pixels) of the distance band counted as support for a radius.
pub const HOUGH_RADIUS_BAND: f32 = 0.5;

/// Gradient magnitudes below this are ignored when voting.
pub const HOUGH_MIN_GRADIENT: f32 = 1e-3;

/// Number of leading bytes read when sniffing a file's content type.
pub const SNIFF_HEADER_LEN: usize = 32;

/// JPEG quality used when writing aligned and annotated photos.
pub const OUTPUT_JPEG_QUALITY: u8 = 95;

/// Outline thickness (pixels) of the circle drawn on annotated photos.
pub const ANNOTATION_OUTLINE_THICKNESS: i32 = 2;

/// Radius (pixels) of the center dot drawn on annotated photos.
pub const ANNOTATION_CENTER_DOT_RADIUS: i32 = 3;
