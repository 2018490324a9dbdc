use std::path::Path;

use console::Style;
use recliner_core::batch::{AlignSummary, BatchConfig, BatchStatistics};
use recliner_core::consts::RARE_RADIUS_MAX_COUNT;

use crate::run::RunArgs;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    mode: Style,
    disabled: Style,
    path: Style,
    warning: Style,
    error: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            mode: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
        }
    }
}

fn auto_or(value: Option<u32>) -> String {
    value.map_or_else(|| "auto".to_string(), |v| format!("{v}px"))
}

pub fn print_run_summary(args: &RunArgs, config: &BatchConfig, photo_count: usize) {
    let s = Styles::new();
    let det = &config.detection;

    println!();
    println!("  {}", s.title.apply_to("Recliner"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(8)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Source"),
        s.path.apply_to(args.sdir.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Destination"),
        s.path.apply_to(args.ddir.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Photos"),
        s.value.apply_to(photo_count)
    );
    let mode = if args.dryrun { "dry run" } else { "align" };
    println!("  {:<14}{}", s.label.apply_to("Mode"), s.mode.apply_to(mode));
    let workers = config
        .jobs
        .map_or_else(|| "auto".to_string(), |n| n.to_string());
    println!("  {:<14}{}", s.label.apply_to("Workers"), s.value.apply_to(workers));
    println!();

    println!("  {}", s.header.apply_to("Detection"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Radius"),
        s.value.apply_to(format!("{}-{}px", det.min_radius, det.max_radius))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Distance"),
        s.value.apply_to(format!("{}px", det.min_distance))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Params"),
        s.value.apply_to(format!("{} / {}", det.param1, det.param2))
    );
    match det.convex_threshold {
        Some(t) => println!(
            "    {:<12}{}",
            s.label.apply_to("Convex hull"),
            s.value.apply_to(format!("threshold {t}"))
        ),
        None => println!(
            "    {:<12}{}",
            s.label.apply_to("Convex hull"),
            s.disabled.apply_to("disabled")
        ),
    }
    println!();

    if !args.dryrun {
        let spec = &config.alignment;
        println!("  {}", s.header.apply_to("Output"));
        println!(
            "    {:<12}{}",
            s.label.apply_to("Canvas"),
            s.value
                .apply_to(format!("{} x {}", auto_or(spec.width), auto_or(spec.height)))
        );
        println!(
            "    {:<12}{}",
            s.label.apply_to("Resize"),
            s.value.apply_to(spec.resize_ratio)
        );
        println!();
    }
}

pub fn print_dry_run_report(stats: &BatchStatistics) {
    let s = Styles::new();

    println!();
    if stats.is_empty() {
        println!(
            "{} no Sun found in any photos",
            s.error.apply_to("[Error]")
        );
        return;
    }

    println!("  {}", s.header.apply_to("Radii detected (tune the next run with these)"));
    for bucket in &stats.radii {
        println!(
            "    radius: {} pixels, count: {}",
            s.value.apply_to(bucket.radius),
            s.value.apply_to(bucket.count)
        );
        if bucket.count <= RARE_RADIUS_MAX_COUNT {
            for photo in &bucket.photos {
                println!("      - {}", s.path.apply_to(photo.display()));
            }
        }
    }
    println!();

    println!("  {}", s.header.apply_to("Circle center to edge (pixels)"));
    println!("    {:?}", stats.edge_distances);
    println!();

    if stats.none_found + stats.ambiguous + stats.failed > 0 {
        println!(
            "  {}",
            s.warning.apply_to(format!(
                "{} without a Sun, {} ambiguous, {} failed",
                stats.none_found, stats.ambiguous, stats.failed
            ))
        );
    }
}

pub fn print_align_report(summary: &AlignSummary, dest: &Path) {
    let s = Styles::new();

    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Written"),
        s.value.apply_to(summary.written)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Skipped"),
        s.warning.apply_to(summary.skipped())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Failed"),
        s.error.apply_to(summary.failed)
    );
    println!();
    println!("Output saved to {}", s.path.apply_to(dest.display()));
}
