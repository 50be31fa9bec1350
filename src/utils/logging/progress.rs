//! Progress bars for the long-running phases
//!
//! Lineage resolution reports one tick per deceased person; dataset loading
//! only shows a spinner.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Template of counted bars
pub const BAR_TEMPLATE: &str = "{msg:>28} [{elapsed_precise}] {wide_bar:.cyan/blue} {pos}/{len} ({eta})";

/// Template of spinners
pub const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg} [{elapsed_precise}]";

/// Counted progress bar
///
/// # Arguments
/// * `length` - Number of steps
/// * `description` - Optional label shown left of the bar
#[must_use]
pub fn create_main_progress_bar(length: u64, description: Option<&str>) -> ProgressBar {
    let style = ProgressStyle::with_template(BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    let pb = ProgressBar::new(length).with_style(style);
    if let Some(label) = description {
        pb.set_message(label.to_string());
    }
    pb
}

/// Spinner for phases of unknown length
#[must_use]
pub fn create_spinner(message: Option<&str>) -> ProgressBar {
    let style = ProgressStyle::with_template(SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    let pb = ProgressBar::new_spinner().with_style(style);
    if let Some(label) = message {
        pb.set_message(label.to_string());
    }
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// Counted bar when enabled, a hidden one otherwise
///
/// A hidden bar still tracks its position, so callers need no branching.
#[must_use]
pub fn optional_progress_bar(enabled: bool, length: u64, description: &str) -> ProgressBar {
    if enabled {
        create_main_progress_bar(length, Some(description))
    } else {
        ProgressBar::hidden()
    }
}

/// Finish a bar, replacing its label when given
pub fn finish_progress_bar(pb: &ProgressBar, message: Option<&str>) {
    match message {
        Some(label) => pb.finish_with_message(label.to_string()),
        None => pb.finish(),
    }
}
