//! Terminal progress display for searches and filtering
//!
//! Thin wrappers over indicatif: a spinner while a request is in flight and
//! a bar driven by [`FilterProgress`] reports while details are resolved.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::app::filter::FilterProgress;

const TICK_STRINGS: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Spinner shown while waiting on the network
pub fn spinner(message: impl Into<String>, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&TICK_STRINGS);
    spinner.set_style(style);
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Progress bar for detail-backed filtering
#[derive(Debug, Clone)]
pub struct FilterProgressBar {
    bar: ProgressBar,
}

impl FilterProgressBar {
    pub fn new(quiet: bool) -> Self {
        if quiet {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new(0);
        let style = ProgressStyle::default_bar()
            .template("{prefix:.bold} [{bar:30.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏ ");
        bar.set_style(style);
        bar.set_prefix("Filtering");
        bar.set_message("fetching details");
        Self { bar }
    }

    /// Apply a progress report from the filter engine
    pub fn update(&self, progress: FilterProgress) {
        self.bar.set_length(progress.total as u64);
        self.bar.set_position(progress.current as u64);
    }

    pub fn finish(&self, kept: usize) {
        self.bar.finish_with_message(format!("{} kept", kept));
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_tracks_reports() {
        let bar = FilterProgressBar::new(true);
        bar.update(FilterProgress::new(5, 12));
        assert_eq!(bar.position(), 5);
        bar.update(FilterProgress::new(12, 12));
        assert_eq!(bar.position(), 12);
        bar.finish(3);
    }
}
