//! Error handling for stemma.

pub mod util;

use std::io;
use std::path::PathBuf;

use crate::models::types::PersonId;

/// Specialized error type for stemma
#[derive(Debug, thiserror::Error)]
pub enum StemmaError {
    /// Error opening, reading or writing a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// IO error tied to a specific path
    #[error("IO error on {path}: {source} ({purpose})")]
    FileIo {
        /// File or directory involved
        path: PathBuf,
        /// Why the file was being accessed
        purpose: String,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Error (de)serializing JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A person with this identifier is already registered
    #[error("Duplicate person id {0}")]
    DuplicateId(PersonId),

    /// A record could not be turned into a person or relation
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Relation type label not recognised
    #[error("Unknown relation type: {0}")]
    UnknownRelationType(String),

    /// Certainty model label not recognised
    #[error("Unknown certainty model: {0}")]
    UnknownModel(String),

    /// Network scope label not recognised
    #[error("Unknown network scope: {0}")]
    UnknownScope(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StemmaError {
    /// Create an invalid-record error
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error only concerns a single input record.
    ///
    /// Record-level errors are logged and skipped during a batch load.
    #[must_use]
    pub const fn is_record_level(&self) -> bool {
        matches!(
            self,
            Self::DuplicateId(_) | Self::InvalidRecord(_) | Self::UnknownRelationType(_)
        )
    }
}

/// Result type for stemma operations
pub type Result<T> = std::result::Result<T, StemmaError>;
