use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors. Problems local to a single sequence entry are never raised
/// here; they end up in the injection log instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing a file failed.
    #[error("I/O error for file '{}': {source}", path.display())]
    Io {
        /// The file being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The structure text is empty or only whitespace.
    #[error("structure document is empty")]
    EmptyStructure,

    /// The structure text has no `data_` block header.
    #[error("structure document has no 'data_' block header, is it an mmCIF file?")]
    MissingDataBlock,

    /// A protein entry lacks a usable required field.
    #[error("sequence entry {entry} is missing required field '{field}'")]
    MissingField {
        /// Zero-based position in the `sequences` list
        entry: usize,
        /// Name of the offending field
        field: &'static str,
    },

    /// A protein sequence has characters outside ASCII.
    #[error("sequence entry {entry} has non-ASCII characters in its sequence")]
    InvalidSequence {
        /// Zero-based position in the `sequences` list
        entry: usize,
    },

    /// A job was requested without any sequence entries.
    #[error("no sequences provided")]
    NoSequences,

    /// The seed list has no valid integer.
    #[error("at least one valid seed is required, got '{0}'")]
    NoSeeds(String),

    /// The input specification could not be decoded or encoded.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing a table failed.
    #[error("failed to write table: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// The worker pool could not be created.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    /// Wrap an I/O error with the path that caused it.
    pub fn from_io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
