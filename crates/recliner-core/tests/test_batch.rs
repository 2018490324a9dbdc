mod common;

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use recliner_core::batch::{
    align_all, check_destination, dry_run, prepare_batch, BatchConfig, BatchStage, NoOpReporter,
    ProgressReporter,
};
use recliner_core::detection::HoughGradient;
use recliner_core::error::ReclinerError;
use recliner_core::io::load_photo;

use common::{file_names, small_params, write_mixed_batch, write_sun_jpeg};

fn small_config() -> BatchConfig {
    BatchConfig {
        detection: small_params(),
        ..BatchConfig::default()
    }
}

fn noop() -> Arc<dyn ProgressReporter> {
    Arc::new(NoOpReporter)
}

#[derive(Default)]
struct CountingReporter {
    stages: Mutex<Vec<(BatchStage, usize)>>,
    advances: AtomicUsize,
    finished: AtomicUsize,
}

impl ProgressReporter for CountingReporter {
    fn begin_stage(&self, stage: BatchStage, total_items: usize) {
        self.stages.lock().unwrap().push((stage, total_items));
    }

    fn advance(&self, _items_done: usize) {
        self.advances.fetch_add(1, Ordering::SeqCst);
    }

    fn finish_stage(&self) {
        self.finished.fetch_add(1, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// Pre-flight
// ---------------------------------------------------------------------------

#[test]
fn test_existing_destination_rejected_without_writes() {
    let src = tempfile::tempdir().unwrap();
    write_sun_jpeg(src.path(), "a.jpg", 32, 32, &[]);
    let dest = tempfile::tempdir().unwrap();
    fs::write(dest.path().join("keep.txt"), "x").unwrap();

    let err = prepare_batch(src.path(), dest.path(), false).unwrap_err();

    assert!(matches!(err, ReclinerError::DestinationExists(_)));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(file_names(dest.path()), vec!["keep.txt"]);
}

#[test]
fn test_missing_destination_parent_rejected() {
    let root = tempfile::tempdir().unwrap();
    let dest = root.path().join("missing").join("out");

    let err = check_destination(&dest).unwrap_err();

    assert!(matches!(err, ReclinerError::DestinationParentMissing(_)));
    assert!(!root.path().join("missing").exists());
}

#[test]
fn test_no_input_exit_code_two() {
    let src = tempfile::tempdir().unwrap();
    fs::write(src.path().join("notes.txt"), "no photos here").unwrap();
    let root = tempfile::tempdir().unwrap();
    let dest = root.path().join("out");

    let err = prepare_batch(src.path(), &dest, false).unwrap_err();

    assert!(matches!(err, ReclinerError::NoInput(_)));
    assert_eq!(err.exit_code(), 2);
    assert!(!dest.exists());
}

#[test]
fn test_duplicate_names_rejected_before_destination_created() {
    let src = tempfile::tempdir().unwrap();
    for sub in ["a", "b"] {
        let dir = src.path().join(sub);
        fs::create_dir(&dir).unwrap();
        write_sun_jpeg(&dir, "sun.jpg", 32, 32, &[]);
    }
    let root = tempfile::tempdir().unwrap();
    let dest = root.path().join("out");

    let err = prepare_batch(src.path(), &dest, true).unwrap_err();

    assert!(matches!(err, ReclinerError::DuplicateOutputName { .. }));
    assert!(!dest.exists());
}

#[test]
fn test_prepare_batch_creates_destination() {
    let src = tempfile::tempdir().unwrap();
    write_mixed_batch(src.path());
    let root = tempfile::tempdir().unwrap();
    let dest = root.path().join("out");

    let photos = prepare_batch(src.path(), &dest, false).unwrap();

    assert_eq!(photos.len(), 3);
    assert!(dest.is_dir());
    assert!(file_names(&dest).is_empty());
}

// ---------------------------------------------------------------------------
// Dry run
// ---------------------------------------------------------------------------

#[test]
fn test_dry_run_full_size_photos() {
    let src = tempfile::tempdir().unwrap();
    for name in ["e1.jpg", "e2.jpg", "e3.jpg"] {
        write_sun_jpeg(src.path(), name, 640, 640, &[(320, 320, 280)]);
    }
    let root = tempfile::tempdir().unwrap();
    let dest = root.path().join("out");
    let photos = prepare_batch(src.path(), &dest, false).unwrap();

    let stats = dry_run(&photos, &dest, &BatchConfig::default(), &HoughGradient, noop()).unwrap();

    assert_eq!(stats.photos, 3);
    assert_eq!(stats.detected, 3);
    let histogram = stats.histogram();
    assert_eq!(histogram.len(), 1, "histogram = {histogram:?}");
    let (&radius, &count) = histogram.iter().next().unwrap();
    assert_eq!(count, 3);
    assert!((278..=282).contains(&radius), "radius = {radius}");
    assert_eq!(stats.edge_distances.len(), 3);
    assert!(stats
        .edge_distances
        .iter()
        .all(|&d| (318..=322).contains(&d)));
    assert_eq!(file_names(&dest), vec!["e1.jpg", "e2.jpg", "e3.jpg"]);
}

#[test]
fn test_dry_run_mixed_outcomes() {
    let src = tempfile::tempdir().unwrap();
    let photos = write_mixed_batch(src.path());
    let root = tempfile::tempdir().unwrap();
    let dest = root.path().join("out");
    fs::create_dir(&dest).unwrap();
    let reporter = Arc::new(CountingReporter::default());

    let stats = dry_run(&photos, &dest, &small_config(), &HoughGradient, reporter.clone()).unwrap();

    assert_eq!(stats.photos, 3);
    assert_eq!(stats.detected, 1);
    assert_eq!(stats.none_found, 1);
    assert_eq!(stats.ambiguous, 1);
    assert_eq!(stats.failed, 0);
    // Ambiguous photos never reach the histogram.
    assert_eq!(stats.radii.len(), 1);
    assert_eq!(stats.radii[0].photos, vec![photos[0].clone()]);

    // Annotated copies for every photo with at least one circle.
    assert_eq!(file_names(&dest), vec!["a_sun.jpg", "c_double.jpg"]);
    let annotated = load_photo(&dest.join("c_double.jpg")).unwrap();
    assert_eq!((annotated.width(), annotated.height()), (400, 200));

    assert_eq!(
        *reporter.stages.lock().unwrap(),
        vec![(BatchStage::Detecting, 3)]
    );
    assert_eq!(reporter.advances.load(Ordering::SeqCst), 3);
    assert_eq!(reporter.finished.load(Ordering::SeqCst), 1);
}

#[test]
fn test_dry_run_without_annotation_writes_nothing() {
    let src = tempfile::tempdir().unwrap();
    let photos = write_mixed_batch(src.path());
    let root = tempfile::tempdir().unwrap();
    let dest = root.path().join("out");
    fs::create_dir(&dest).unwrap();
    let config = BatchConfig {
        annotate: false,
        ..small_config()
    };

    let stats = dry_run(&photos, &dest, &config, &HoughGradient, noop()).unwrap();

    assert_eq!(stats.detected, 1);
    assert!(file_names(&dest).is_empty());
}

#[test]
fn test_dry_run_nothing_detected() {
    let src = tempfile::tempdir().unwrap();
    let photos = vec![
        write_sun_jpeg(src.path(), "x.jpg", 100, 100, &[]),
        write_sun_jpeg(src.path(), "y.jpg", 100, 100, &[]),
    ];
    let root = tempfile::tempdir().unwrap();
    let dest = root.path().join("out");
    fs::create_dir(&dest).unwrap();

    let stats = dry_run(&photos, &dest, &small_config(), &HoughGradient, noop()).unwrap();

    assert!(stats.is_empty());
    assert_eq!(stats.none_found, 2);
    assert!(file_names(&dest).is_empty());
}

#[test]
fn test_dry_run_independent_of_pool_size() {
    let src = tempfile::tempdir().unwrap();
    let mut photos = write_mixed_batch(src.path());
    photos.push(write_sun_jpeg(src.path(), "d_sun.jpg", 240, 200, &[(130, 90, 38)]));
    photos.push(write_sun_jpeg(src.path(), "e_sun.jpg", 200, 200, &[(100, 100, 42)]));
    let root = tempfile::tempdir().unwrap();

    let mut results = Vec::new();
    for jobs in [1, 4] {
        let dest = root.path().join(format!("out{jobs}"));
        fs::create_dir(&dest).unwrap();
        let config = BatchConfig {
            jobs: Some(jobs),
            annotate: false,
            ..small_config()
        };
        results.push(dry_run(&photos, &dest, &config, &HoughGradient, noop()).unwrap());
    }

    assert_eq!(results[0], results[1]);
    assert_eq!(results[0].detected, 3);
}

#[test]
fn test_dry_run_corrupt_photo_does_not_stop_batch() {
    let src = tempfile::tempdir().unwrap();
    let good = write_sun_jpeg(src.path(), "good.jpg", 200, 200, &[(100, 100, 40)]);
    let broken = src.path().join("broken.jpg");
    fs::write(&broken, [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46]).unwrap();
    let root = tempfile::tempdir().unwrap();
    let dest = root.path().join("out");
    fs::create_dir(&dest).unwrap();

    let stats = dry_run(&[broken, good], &dest, &small_config(), &HoughGradient, noop()).unwrap();

    assert_eq!(stats.photos, 2);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.detected, 1);
}

// ---------------------------------------------------------------------------
// Align
// ---------------------------------------------------------------------------

#[test]
fn test_align_all_writes_only_single_sun_photos() {
    let src = tempfile::tempdir().unwrap();
    let photos = write_mixed_batch(src.path());
    let root = tempfile::tempdir().unwrap();
    let dest = root.path().join("out");
    fs::create_dir(&dest).unwrap();

    let summary = align_all(&photos, &dest, &small_config(), &HoughGradient, noop()).unwrap();

    assert_eq!(summary.photos, 3);
    assert_eq!(summary.written, 1);
    assert_eq!(summary.none_found, 1);
    assert_eq!(summary.ambiguous, 1);
    assert_eq!(summary.skipped(), 2);
    assert_eq!(file_names(&dest), vec!["a_sun.jpg"]);

    let aligned = load_photo(&dest.join("a_sun.jpg")).unwrap();
    // Canvas is twice the center-to-edge distance of about 100px.
    assert!(aligned.width().abs_diff(200) <= 2, "width = {}", aligned.width());
    assert_eq!(aligned.width(), aligned.height());
    let (cx, cy) = (aligned.width() / 2, aligned.height() / 2);
    assert!(aligned.rgb.get_pixel(cx, cy).0[0] > 150);
    assert!(aligned.rgb.get_pixel(2, 2).0[0] < 40);
}

#[test]
fn test_align_all_fixed_canvas() {
    let src = tempfile::tempdir().unwrap();
    let photos = vec![
        write_sun_jpeg(src.path(), "left.jpg", 300, 200, &[(90, 100, 40)]),
        write_sun_jpeg(src.path(), "right.jpg", 300, 200, &[(210, 100, 40)]),
    ];
    let root = tempfile::tempdir().unwrap();
    let dest = root.path().join("out");
    fs::create_dir(&dest).unwrap();
    let mut config = small_config();
    config.alignment.width = Some(160);
    config.alignment.height = Some(120);
    config.alignment.resize_ratio = 0.5;

    let summary = align_all(&photos, &dest, &config, &HoughGradient, noop()).unwrap();

    assert_eq!(summary.written, 2);
    for name in ["left.jpg", "right.jpg"] {
        let aligned = load_photo(&dest.join(name)).unwrap();
        assert_eq!((aligned.width(), aligned.height()), (160, 120));
        assert!(aligned.rgb.get_pixel(80, 60).0[0] > 150, "{name}");
        assert!(aligned.rgb.get_pixel(2, 2).0[0] < 40, "{name}");
    }
}

#[test]
fn test_cancelled_batch_writes_nothing() {
    let src = tempfile::tempdir().unwrap();
    let photos = write_mixed_batch(src.path());
    let root = tempfile::tempdir().unwrap();
    let dest = root.path().join("out");
    fs::create_dir(&dest).unwrap();
    let config = small_config();
    config.cancel.cancel();

    let err = align_all(&photos, &dest, &config, &HoughGradient, noop()).unwrap_err();
    assert!(matches!(err, ReclinerError::Cancelled));

    let err = dry_run(&photos, &dest, &config, &HoughGradient, noop()).unwrap_err();
    assert!(matches!(err, ReclinerError::Cancelled));

    assert!(file_names(&dest).is_empty());
}
