//! Utility functions for error handling
//!
//! File helpers that attach the path and purpose to IO failures.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, StemmaError};

/// Open a file for reading with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(file_error(
            path,
            purpose,
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        ));
    }

    if !path.is_file() {
        return Err(file_error(
            path,
            purpose,
            io::Error::new(io::ErrorKind::InvalidInput, "path is not a file"),
        ));
    }

    fs::File::open(path).map_err(|e| file_error(path, purpose, e))
}

/// Create (or truncate) a file for writing, creating parent directories
pub fn create_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent, purpose)?;
        }
    }
    fs::File::create(path).map_err(|e| file_error(path, purpose, e))
}

/// Make sure a directory exists, creating it when missing
pub fn ensure_directory(path: &Path, purpose: &str) -> Result<()> {
    if path.exists() {
        if path.is_dir() {
            return Ok(());
        }
        return Err(file_error(
            path,
            purpose,
            io::Error::new(io::ErrorKind::InvalidInput, "path is not a directory"),
        ));
    }

    fs::create_dir_all(path).map_err(|e| file_error(path, purpose, e))
}

fn file_error(path: &Path, purpose: &str, source: io::Error) -> StemmaError {
    let purpose = match source.kind() {
        io::ErrorKind::PermissionDenied => {
            format!("{purpose}: permission denied - check file permissions")
        }
        _ => purpose.to_string(),
    };
    StemmaError::FileIo {
        path: path.to_path_buf(),
        purpose,
        source,
    }
}
