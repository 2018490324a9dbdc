use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReclinerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("{} exists, please choose a new one", .0.display())]
    DestinationExists(PathBuf),

    #[error("parent of {} does not exist, specify the destination under an existing path", .0.display())]
    DestinationParentMissing(PathBuf),

    #[error("no JPEG file found in {}", .0.display())]
    NoInput(PathBuf),

    #[error("output name {name} is shared by {} and {}", first.display(), second.display())]
    DuplicateOutputName {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Batch cancelled")]
    Cancelled,

    #[error("Worker pool error: {0}")]
    ThreadPool(String),
}

impl ReclinerError {
    /// Process exit code for an error that stops the batch before it starts.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NoInput(_) => 2,
            _ => 1,
        }
    }

    /// True for pre-flight errors caused by the destination or the parameters.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::DestinationExists(_)
                | Self::DestinationParentMissing(_)
                | Self::DuplicateOutputName { .. }
                | Self::InvalidParameters(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ReclinerError>;
