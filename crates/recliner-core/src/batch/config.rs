use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::align::AlignmentSpec;
use crate::detection::DetectionParameters;
use crate::error::{ReclinerError, Result};

/// Everything a batch needs, built once before it starts and shared
/// read-only by every worker.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchConfig {
    #[serde(default)]
    pub detection: DetectionParameters,
    #[serde(default)]
    pub alignment: AlignmentSpec,
    /// Worker threads; `None` uses the available parallelism.
    #[serde(default)]
    pub jobs: Option<usize>,
    /// Dry run: write a copy of each photo with the found circles drawn on it.
    #[serde(default = "default_true")]
    pub annotate: bool,
    #[serde(skip)]
    pub cancel: CancelFlag,
}

fn default_true() -> bool {
    true
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            detection: DetectionParameters::default(),
            alignment: AlignmentSpec::default(),
            jobs: None,
            annotate: true,
            cancel: CancelFlag::default(),
        }
    }
}

impl BatchConfig {
    pub fn validate(&self) -> Result<()> {
        self.detection.validate()?;
        self.alignment.validate()?;
        if self.jobs == Some(0) {
            return Err(ReclinerError::InvalidParameters(
                "worker count must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Cooperative cancellation shared between the caller and the workers.
///
/// Photos not yet started when the flag is raised are skipped.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
