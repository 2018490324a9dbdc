pub mod image_io;
pub mod locate;

pub use image_io::{is_jpeg, load_photo, save_jpeg, sniff_format};
pub use locate::{check_output_names, locate_photos};
