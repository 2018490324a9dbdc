pub mod compose;
pub mod config;
pub mod geometry;

pub use compose::{align_photo, compose};
pub use config::AlignmentSpec;
pub use geometry::CropGeometry;
