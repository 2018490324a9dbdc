use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, error, info, warn};

use crate::align::align_photo;
use crate::detection::sun::log_detection;
use crate::detection::{
    annotate_circles, classify, detect_circles, detect_sun, CircleFinder, DetectionResult,
};
use crate::error::{ReclinerError, Result};
use crate::io::{load_photo, save_jpeg};
use crate::photo::base_name;

use super::config::BatchConfig;
use super::stats::{AlignSummary, BatchStatistics, StatisticsAccumulator};
use super::types::{BatchStage, PhotoOutcome, ProgressReporter};

/// Detect the Sun in every photo and gather statistics for tuning.
///
/// Photos are processed in parallel; a failure only affects its own photo.
/// When `config.annotate` is set, a copy of each photo with the found circles
/// drawn on it is written to `dest` under the photo's own file name.
pub fn dry_run(
    photos: &[PathBuf],
    dest: &Path,
    config: &BatchConfig,
    finder: &dyn CircleFinder,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<BatchStatistics> {
    let outcomes = run_parallel(photos, config, &reporter, BatchStage::Detecting, |path| {
        dry_run_photo(path, dest, config, finder)
    })?;

    let mut acc = StatisticsAccumulator::new();
    for (path, outcome) in outcomes {
        acc.record(path, &outcome);
    }
    let stats = acc.finish();

    if stats.is_empty() {
        warn!("No Sun found in any photos");
    } else {
        info!(
            detected = stats.detected,
            photos = stats.photos,
            "Dry run complete"
        );
    }
    finish_or_cancel(config, stats)
}

/// Detect the Sun in every photo and write an aligned copy of each photo
/// with exactly one Sun to `dest`, under the photo's own file name.
///
/// Photos without a single Sun are skipped; failures are logged and do not
/// stop the batch.
pub fn align_all(
    photos: &[PathBuf],
    dest: &Path,
    config: &BatchConfig,
    finder: &dyn CircleFinder,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<AlignSummary> {
    let outcomes = run_parallel(photos, config, &reporter, BatchStage::Aligning, |path| {
        align_one(path, dest, config, finder)
    })?;

    let mut summary = AlignSummary::default();
    for (_, outcome) in &outcomes {
        summary.record(outcome);
    }
    info!(
        written = summary.written,
        skipped = summary.skipped(),
        failed = summary.failed,
        "Alignment complete"
    );
    finish_or_cancel(config, summary)
}

fn finish_or_cancel<T>(config: &BatchConfig, value: T) -> Result<T> {
    if config.cancel.is_cancelled() {
        Err(ReclinerError::Cancelled)
    } else {
        Ok(value)
    }
}

fn build_pool(jobs: Option<usize>) -> Result<ThreadPool> {
    let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("recliner-worker-{i}"));
    if let Some(n) = jobs {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReclinerError::ThreadPool(e.to_string()))
}

/// Map `task` over `photos` on a dedicated pool. Output keeps input order.
fn run_parallel<F>(
    photos: &[PathBuf],
    config: &BatchConfig,
    reporter: &Arc<dyn ProgressReporter>,
    stage: BatchStage,
    task: F,
) -> Result<Vec<(PathBuf, PhotoOutcome)>>
where
    F: Fn(&Path) -> PhotoOutcome + Send + Sync,
{
    let pool = build_pool(config.jobs)?;
    debug!(threads = pool.current_num_threads(), %stage, "Worker pool ready");

    reporter.begin_stage(stage, photos.len());
    let done = AtomicUsize::new(0);
    let outcomes: Vec<(PathBuf, PhotoOutcome)> = pool.install(|| {
        photos
            .par_iter()
            .map(|path| {
                let outcome = if config.cancel.is_cancelled() {
                    PhotoOutcome::Cancelled
                } else {
                    task(path.as_path())
                };
                reporter.advance(done.fetch_add(1, Ordering::Relaxed) + 1);
                (path.clone(), outcome)
            })
            .collect()
    });
    reporter.finish_stage();

    Ok(outcomes)
}

fn output_path(dest: &Path, photo: &Path) -> PathBuf {
    dest.join(base_name(photo))
}

fn dry_run_photo(
    path: &Path,
    dest: &Path,
    config: &BatchConfig,
    finder: &dyn CircleFinder,
) -> PhotoOutcome {
    info!(photo = %base_name(path), "Processing");
    let photo = match load_photo(path) {
        Ok(photo) => photo,
        Err(e) => return failed(path, e),
    };

    let circles = detect_circles(&photo, &config.detection, finder);
    let result = classify(&circles, photo.width(), photo.height());
    log_detection(&photo, &result);

    if config.annotate && !circles.is_empty() {
        let annotated = annotate_circles(&photo.rgb, &circles);
        let out = output_path(dest, path);
        if let Err(e) = save_jpeg(&annotated, &out) {
            error!(
                photo = %path.display(),
                output = %out.display(),
                error = %e,
                "Failed to write annotated copy"
            );
        }
    }

    match result {
        DetectionResult::NoneFound => PhotoOutcome::NoneFound,
        DetectionResult::Ambiguous(count) => PhotoOutcome::Ambiguous(count),
        DetectionResult::Found(sun) => PhotoOutcome::Detected(sun),
    }
}

fn align_one(
    path: &Path,
    dest: &Path,
    config: &BatchConfig,
    finder: &dyn CircleFinder,
) -> PhotoOutcome {
    info!(photo = %base_name(path), "Processing");
    let photo = match load_photo(path) {
        Ok(photo) => photo,
        Err(e) => return failed(path, e),
    };

    let sun = match detect_sun(&photo, &config.detection, finder) {
        DetectionResult::Found(sun) => sun,
        DetectionResult::NoneFound => return PhotoOutcome::NoneFound,
        DetectionResult::Ambiguous(count) => return PhotoOutcome::Ambiguous(count),
    };

    let out = output_path(dest, path);
    match align_photo(&photo, &sun, &config.alignment).and_then(|img| save_jpeg(&img, &out)) {
        Ok(()) => PhotoOutcome::Written(out),
        Err(e) => failed(path, e),
    }
}

fn failed(path: &Path, err: ReclinerError) -> PhotoOutcome {
    error!(photo = %path.display(), error = %err, "Photo failed");
    PhotoOutcome::Failed(err.to_string())
}
