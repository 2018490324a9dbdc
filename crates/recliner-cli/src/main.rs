mod progress;
mod run;
mod summary;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use console::style;
use progress::BarReporter;
use recliner_core::error::ReclinerError;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "recliner",
    about = "Recognize, crop and align the Sun (normal Sun, partial/total eclipse) in photos (JPEG)"
)]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(flatten)]
    run: run::RunArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    let reporter = Arc::new(BarReporter::new(cli.verbose));
    let log_writer = reporter.log_writer();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(move || log_writer.clone())
        .init();

    match run::run(&cli.run, reporter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", style("[Error]").red().bold());
            ExitCode::from(exit_code(&err))
        }
    }
}

/// 1 for configuration errors, 2 when there is nothing to process.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<ReclinerError>()
        .map_or(1, ReclinerError::exit_code)
}
