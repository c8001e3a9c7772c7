//! Spinner shown while a transfer runs

use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for transfer phases
pub struct ProgressDisplay {
    spinner: ProgressBar,
}

impl ProgressDisplay {
    /// Start a spinner, hidden when stderr is not a terminal
    pub fn new(message: &str) -> Self {
        let spinner = if Term::stderr().is_term() {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };

        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));

        Self { spinner }
    }

    /// Show the phase currently running
    pub fn set_phase(&self, phase: &str) {
        self.spinner.set_message(format!("{phase}..."));
    }

    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.spinner.abandon();
    }
}

impl Drop for ProgressDisplay {
    fn drop(&mut self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}
