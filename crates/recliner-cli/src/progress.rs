use std::io::{self, Write};

use indicatif::{ProgressBar, ProgressStyle};
use recliner_core::batch::{BatchStage, ProgressReporter};

/// Drives a terminal progress bar from batch progress updates.
pub struct BarReporter {
    bar: ProgressBar,
}

impl BarReporter {
    /// The bar stays hidden in verbose mode so it does not fight with the
    /// per-photo log lines.
    pub fn new(verbose: bool) -> Self {
        let bar = if verbose {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(0)
        };
        if let Ok(style) = ProgressStyle::default_bar().template("{msg:20} [{bar:40}] {pos}/{len}") {
            bar.set_style(style.progress_chars("=> "));
        }
        Self { bar }
    }

    /// Stderr writer for log events that clears the bar while a line is written.
    pub fn log_writer(&self) -> BarLogWriter {
        BarLogWriter {
            bar: self.bar.clone(),
        }
    }
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: BatchStage, total_items: usize) {
        self.bar.set_length(total_items as u64);
        self.bar.set_position(0);
        self.bar.set_message(stage.to_string());
    }

    fn advance(&self, items_done: usize) {
        self.bar.set_position(items_done as u64);
    }

    fn finish_stage(&self) {
        self.bar.finish_with_message("Done");
    }
}

/// Writes to stderr with the progress bar suspended.
#[derive(Clone)]
pub struct BarLogWriter {
    bar: ProgressBar,
}

impl Write for BarLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bar.suspend(|| io::stderr().write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.bar.suspend(|| io::stderr().flush())
    }
}
