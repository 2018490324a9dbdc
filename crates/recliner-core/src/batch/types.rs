use std::path::PathBuf;

use crate::detection::SunDetection;

/// Batch stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchStage {
    Detecting,
    Aligning,
}

impl std::fmt::Display for BatchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Detecting => write!(f, "Detecting the Sun"),
            Self::Aligning => write!(f, "Aligning photos"),
        }
    }
}

/// Terminal state of one photo.
#[derive(Clone, Debug, PartialEq)]
pub enum PhotoOutcome {
    /// Dry run: exactly one Sun found.
    Detected(SunDetection),
    NoneFound,
    /// Several circles found; the photo is skipped.
    Ambiguous(usize),
    /// Aligned photo written to this path.
    Written(PathBuf),
    /// Reading, aligning or writing failed.
    Failed(String),
    /// Not started because the batch was cancelled.
    Cancelled,
}

/// Thread-safe progress reporting for a batch.
///
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A stage has started over `total_items` photos.
    fn begin_stage(&self, _stage: BatchStage, _total_items: usize) {}

    /// One more photo has finished; `items_done` counts all finished so far.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// Progress reporter that ignores all updates.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
