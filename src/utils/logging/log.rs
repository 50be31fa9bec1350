//! Logging utilities
//!
//! Uniform messages for reading inputs and writing generated files.

use std::path::Path;
use std::time::Duration;

/// Log the start of reading a record file
///
/// # Arguments
/// * `kind` - What the file holds, e.g. `"person records"`
/// * `path` - File being read
pub fn log_read_start(kind: &str, path: &Path) {
    log::info!("Reading {kind} from {}", path.display());
}

/// Log the outcome of reading a record file
///
/// # Arguments
/// * `kind` - What the file holds
/// * `path` - File that was read
/// * `kept` - Records parsed successfully
/// * `skipped` - Records rejected while parsing
/// * `elapsed` - Optional elapsed time
pub fn log_read_complete(
    kind: &str,
    path: &Path,
    kept: usize,
    skipped: usize,
    elapsed: Option<Duration>,
) {
    match elapsed {
        Some(duration) => log::info!(
            "Read {kept} {kind} from {} in {duration:?}",
            path.display()
        ),
        None => log::info!("Read {kept} {kind} from {}", path.display()),
    }
    if skipped > 0 {
        log::warn!("Skipped {skipped} malformed {kind} in {}", path.display());
    }
}

/// Log a generated output file
pub fn log_written(what: &str, path: &Path) {
    log::info!("Wrote {what} to {}", path.display());
}

/// Log a warning, optionally tied to a path
pub fn log_warning(message: &str, path: Option<&Path>) {
    match path {
        Some(path) => log::warn!("{message}: {}", path.display()),
        None => log::warn!("{message}"),
    }
}
