pub mod align;
pub mod batch;
pub mod consts;
pub mod detection;
pub mod error;
pub mod io;
pub mod photo;
