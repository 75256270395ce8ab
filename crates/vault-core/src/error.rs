//! Error types for vault-core

use crate::schema::Series;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in vault-core
#[derive(Debug, Error)]
pub enum Error {
    /// Owner identifier failed the safe-pattern check
    #[error("invalid owner identifier: {0:?}")]
    InvalidOwner(String),

    /// Incoming record is missing a field or failed coercion
    #[error("malformed {series} record: {reason}")]
    MalformedRecord { series: Series, reason: String },

    /// Payload did not contain any characters
    #[error("showcase for owner '{0}' contains no characters")]
    EmptyShowcase(String),

    /// Attempt to write a snapshot version that already exists
    #[error("snapshot {series} v{version} already exists for owner '{owner}'")]
    StorageConflict {
        owner: String,
        series: Series,
        version: u32,
    },

    /// Requested snapshot version does not exist
    #[error("snapshot {series} v{version} not found for owner '{owner}'")]
    SnapshotNotFound {
        owner: String,
        series: Series,
        version: u32,
    },

    /// Series has no snapshot at all
    #[error("no {series} snapshots stored for owner '{owner}'")]
    NoSnapshots { owner: String, series: Series },

    /// Snapshot header does not match the series columns
    #[error("schema mismatch in '{path}': expected '{expected}', found '{found}'")]
    SchemaMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    /// Unknown series name
    #[error("unknown series '{0}' (expected characters, artifacts or combined)")]
    UnknownSeries(String),

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV error from the csv crate
    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Directory traversal error
    #[error("failed to traverse directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
