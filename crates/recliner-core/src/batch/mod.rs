pub mod config;
mod coordinator;
pub mod preflight;
pub mod stats;
mod types;

pub use config::{BatchConfig, CancelFlag};
pub use coordinator::{align_all, dry_run};
pub use preflight::{check_destination, create_destination, prepare_batch};
pub use stats::{AlignSummary, BatchStatistics, RadiusBucket, StatisticsAccumulator};
pub use types::{BatchStage, NoOpReporter, PhotoOutcome, ProgressReporter};
