//! Error types for the to-do domain.
//!
//! Blank titles and stale indices are not errors: the reducer ignores them.
//! What remains here are caller bugs and start-up failures.

use std::path::PathBuf;
use tasklist_runtime::StoreError;
use thiserror::Error;

/// Errors surfaced by the tasklist crate
#[derive(Error, Debug)]
pub enum TodoError {
    /// A value outside the accepted set was passed in
    #[error("invalid {what}: {value:?} (expected one of: {expected})")]
    InvalidArgument {
        /// Which argument was rejected
        what: &'static str,
        /// The rejected input
        value: String,
        /// Human readable list of accepted values
        expected: &'static str,
    },

    /// The seed file could not be read
    #[error("failed to read seed file {path}: {source}")]
    SeedRead {
        /// Path that was tried
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The seed data is not a JSON list of `{title, isCompleted}` records
    #[error("malformed seed data: {0}")]
    SeedFormat(#[from] serde_json::Error),

    /// The store refused the action
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience alias used across the crate
pub type Result<T, E = TodoError> = std::result::Result<T, E>;
