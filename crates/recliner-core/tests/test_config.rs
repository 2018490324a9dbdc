use recliner_core::align::AlignmentSpec;
use recliner_core::batch::{BatchConfig, BatchStage, CancelFlag};
use recliner_core::detection::DetectionParameters;
use recliner_core::error::ReclinerError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_detection_defaults() {
    let p = DetectionParameters::default();
    assert_eq!(p.min_distance, 600.0);
    assert_eq!(p.min_radius, 275);
    assert_eq!(p.max_radius, 290);
    assert_eq!(p.param1, 100.0);
    assert_eq!(p.param2, 30);
    assert_eq!(p.convex_threshold, None);
    assert!(p.validate().is_ok());
}

#[test]
fn test_batch_defaults() {
    let config = BatchConfig::default();
    assert!(config.annotate);
    assert_eq!(config.jobs, None);
    assert_eq!(config.alignment, AlignmentSpec::default());
    assert_eq!(config.alignment.resize_ratio, 1.0);
    assert!(!config.cancel.is_cancelled());
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_toml_fills_defaults() {
    let config: BatchConfig = toml::from_str(
        r#"
        jobs = 4

        [detection]
        min_radius = 100
        max_radius = 120

        [alignment]
        width = 800
        "#,
    )
    .unwrap();

    assert_eq!(config.jobs, Some(4));
    assert!(config.annotate);
    assert_eq!(config.detection.min_radius, 100);
    assert_eq!(config.detection.max_radius, 120);
    assert_eq!(config.detection.param2, 30);
    assert_eq!(config.alignment.width, Some(800));
    assert_eq!(config.alignment.height, None);
    assert_eq!(config.alignment.resize_ratio, 1.0);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn assert_invalid(result: Result<(), ReclinerError>) {
    match result {
        Err(err @ ReclinerError::InvalidParameters(_)) => {
            assert!(err.is_configuration());
            assert_eq!(err.exit_code(), 1);
        }
        other => panic!("expected invalid parameters, got {other:?}"),
    }
}

#[test]
fn test_detection_validation() {
    let base = DetectionParameters::default();
    assert_invalid(
        DetectionParameters {
            min_radius: 300,
            ..base.clone()
        }
        .validate(),
    );
    assert_invalid(
        DetectionParameters {
            min_distance: 0.0,
            ..base.clone()
        }
        .validate(),
    );
    assert_invalid(
        DetectionParameters {
            min_distance: f32::NAN,
            ..base.clone()
        }
        .validate(),
    );
    assert_invalid(
        DetectionParameters {
            min_radius: 0,
            max_radius: 0,
            ..base.clone()
        }
        .validate(),
    );
    assert_invalid(
        DetectionParameters {
            param1: -1.0,
            ..base.clone()
        }
        .validate(),
    );
    assert_invalid(DetectionParameters { param2: 0, ..base }.validate());
}

#[test]
fn test_equal_radii_are_valid() {
    let p = DetectionParameters {
        min_radius: 280,
        max_radius: 280,
        ..DetectionParameters::default()
    };
    assert!(p.validate().is_ok());
}

#[test]
fn test_alignment_validation() {
    assert_invalid(
        AlignmentSpec {
            resize_ratio: 0.0,
            ..AlignmentSpec::default()
        }
        .validate(),
    );
    assert_invalid(
        AlignmentSpec {
            resize_ratio: 1.01,
            ..AlignmentSpec::default()
        }
        .validate(),
    );
    assert_invalid(
        AlignmentSpec {
            width: Some(0),
            ..AlignmentSpec::default()
        }
        .validate(),
    );
    assert!(AlignmentSpec {
        resize_ratio: 1.0,
        width: Some(1),
        height: Some(1),
    }
    .validate()
    .is_ok());
}

#[test]
fn test_zero_jobs_invalid() {
    let config = BatchConfig {
        jobs: Some(0),
        ..BatchConfig::default()
    };
    assert_invalid(config.validate());
}

// ---------------------------------------------------------------------------
// Misc
// ---------------------------------------------------------------------------

#[test]
fn test_cancel_flag_shared_between_clones() {
    let flag = CancelFlag::new();
    let clone = flag.clone();
    assert!(!clone.is_cancelled());
    flag.cancel();
    assert!(clone.is_cancelled());
}

#[test]
fn test_stage_display() {
    assert_eq!(format!("{}", BatchStage::Detecting), "Detecting the Sun");
    assert_eq!(format!("{}", BatchStage::Aligning), "Aligning photos");
}

#[test]
fn test_exit_codes() {
    assert_eq!(ReclinerError::NoInput("in".into()).exit_code(), 2);
    assert_eq!(ReclinerError::Cancelled.exit_code(), 1);
    assert!(!ReclinerError::Cancelled.is_configuration());
    assert!(ReclinerError::DestinationExists("out".into()).is_configuration());
}
