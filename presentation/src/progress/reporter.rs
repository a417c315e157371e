//! Progress reporting for run status events

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Renders `Status` events while a run is in flight
pub trait StatusReporter: Send + Sync {
    fn on_status(&self, status: &str);

    /// The stream ended; `answered` is false when no message arrived.
    fn finish(&self, answered: bool);
}

/// Spinner on stderr showing the latest status
pub struct ProgressReporter {
    spinner: ProgressBar,
}

impl ProgressReporter {
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(Self::spinner_style());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message("Starting...");
        Self { spinner }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {elapsed:.dim} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusReporter for ProgressReporter {
    fn on_status(&self, status: &str) {
        // Completed steps stay on screen above the spinner
        if status.starts_with("Got response") {
            self.spinner
                .println(format!("  {} {}", "v".green(), status.dimmed()));
        }
        self.spinner.set_message(status.to_string());
    }

    fn finish(&self, answered: bool) {
        if answered {
            self.spinner.finish_and_clear();
        } else {
            self.spinner
                .finish_with_message(format!("{}", "No answer".yellow()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl StatusReporter for SimpleProgress {
    fn on_status(&self, status: &str) {
        eprintln!("{} {}", "->".cyan(), status);
    }

    fn finish(&self, _answered: bool) {
        eprintln!();
    }
}

/// Reports nothing (for --quiet)
pub struct NoStatus;

impl StatusReporter for NoStatus {
    fn on_status(&self, _status: &str) {}
    fn finish(&self, _answered: bool) {}
}
