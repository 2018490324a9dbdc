use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use recliner_core::align::AlignmentSpec;
use recliner_core::batch::{align_all, dry_run, prepare_batch, BatchConfig, CancelFlag};
use recliner_core::consts::{
    DEFAULT_HOUGH_PARAM1, DEFAULT_HOUGH_PARAM2, DEFAULT_MAX_RADIUS, DEFAULT_MIN_CIRCLE_DISTANCE,
    DEFAULT_MIN_RADIUS, DEFAULT_OUTPUT_RESIZE_RATIO,
};
use recliner_core::detection::{DetectionParameters, HoughGradient};

use crate::progress::BarReporter;
use crate::summary::{print_align_report, print_dry_run_report, print_run_summary};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Source directory of eclipse photos
    #[arg(value_name = "SDIR")]
    pub sdir: PathBuf,

    /// Destination directory to write the output (must not exist yet)
    #[arg(value_name = "DDIR")]
    pub ddir: PathBuf,

    /// Load photos in subdirectories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Only try to recognize the Sun, output green circles on photos to DDIR, not align photos
    #[arg(short, long)]
    pub dryrun: bool,

    /// Minimal distance (pixels) between detected circles
    #[arg(long, value_name = "CIRD", default_value_t = DEFAULT_MIN_CIRCLE_DISTANCE)]
    pub circlediff: f32,

    /// Minimal radius (pixels) of the Sun for detection
    #[arg(long, value_name = "MINR", default_value_t = DEFAULT_MIN_RADIUS)]
    pub minradius: u32,

    /// Maximum radius (pixels) of the Sun for detection
    #[arg(long, value_name = "MAXR", default_value_t = DEFAULT_MAX_RADIUS)]
    pub maxradius: u32,

    /// Upper edge threshold of the circle detector
    #[arg(long, value_name = "HPM1", default_value_t = DEFAULT_HOUGH_PARAM1)]
    pub houghparam1: f32,

    /// Accumulator votes a circle center needs
    #[arg(long, value_name = "HPM2", default_value_t = DEFAULT_HOUGH_PARAM2)]
    pub houghparam2: u32,

    /// Output canvas width (default: twice the center-to-edge distance)
    #[arg(long, value_name = "OCW")]
    pub outputwidth: Option<u32>,

    /// Output canvas height (default: twice the center-to-edge distance)
    #[arg(long, value_name = "OCH")]
    pub outputheight: Option<u32>,

    /// Output resize ratio in (0, 1]
    #[arg(long, value_name = "R", default_value_t = DEFAULT_OUTPUT_RESIZE_RATIO)]
    pub outputresize: f64,

    /// Detect on the filled convex hull of the region brighter than this level (0-255)
    #[arg(long, value_name = "LEVEL")]
    pub convex_threshold: Option<u8>,

    /// Dry run: do not write annotated copies of the photos
    #[arg(long)]
    pub no_annotate: bool,

    /// Dry run: also write the statistics to this TOML file
    #[arg(long, value_name = "FILE", requires = "dryrun")]
    pub report: Option<PathBuf>,

    /// Number of worker threads (default: available parallelism)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,
}

pub fn build_config(args: &RunArgs) -> BatchConfig {
    BatchConfig {
        detection: DetectionParameters {
            min_distance: args.circlediff,
            min_radius: args.minradius,
            max_radius: args.maxradius,
            param1: args.houghparam1,
            param2: args.houghparam2,
            convex_threshold: args.convex_threshold,
        },
        alignment: AlignmentSpec {
            width: args.outputwidth,
            height: args.outputheight,
            resize_ratio: args.outputresize,
        },
        jobs: args.jobs,
        annotate: !args.no_annotate,
        cancel: CancelFlag::new(),
    }
}

pub fn run(args: &RunArgs, reporter: Arc<BarReporter>) -> Result<()> {
    let config = build_config(args);
    config.validate()?;

    let photos = prepare_batch(&args.sdir, &args.ddir, args.recursive)?;
    print_run_summary(args, &config, photos.len());

    let finder = HoughGradient;

    if args.dryrun {
        let stats = dry_run(&photos, &args.ddir, &config, &finder, reporter)?;
        print_dry_run_report(&stats);

        if let Some(ref path) = args.report {
            let toml_str = toml::to_string_pretty(&stats)?;
            std::fs::write(path, toml_str)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("Statistics saved to {}", path.display());
        }
    } else {
        let summary = align_all(&photos, &args.ddir, &config, &finder, reporter)?;
        print_align_report(&summary, &args.ddir);
    }

    Ok(())
}
