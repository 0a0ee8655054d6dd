//! Error types for loading match data

use std::path::PathBuf;
use thiserror::Error;

/// Problems with a single line of an input file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected at least {expected} tab-separated columns, found {found}")]
    TooFewColumns { expected: usize, found: usize },

    #[error("expected exactly {expected} tab-separated columns, found {found}")]
    ColumnCount { expected: usize, found: usize },

    #[error("invalid date {value:?} (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    #[error("invalid timestamp {value:?} (expected YYYY-MM-DD HH:MM:SS.ffffff)")]
    InvalidTimestamp { value: String },
}

/// Errors raised while reading an input file
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: malformed record: {source}", path.display())]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        #[source]
        source: RecordError,
    },
}
