//! Shared utilities: logging helpers, progress bars and test data generators

pub mod logging;
