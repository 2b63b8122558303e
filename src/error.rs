use std::io;

use thiserror::Error;

/// Malformed input to a [`Paginator`](crate::paginate::Paginator).
///
/// Well-formed but out-of-range indices are not errors; the queries answer
/// those with [`OUT_OF_RANGE`](crate::paginate::OUT_OF_RANGE).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginateError {
    #[error("collection must be an array (got {0})")]
    InvalidCollection(&'static str),
    #[error("{name} must be finite Integer (got {value})")]
    NonInteger { name: &'static str, value: String },
    #[error("{name} is not the safe Integer (got {value})")]
    UnsafeInteger { name: &'static str, value: String },
    #[error("items_per_page must be a positive Integer (got {0})")]
    InvalidPageSize(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidCollection,
    NonInteger,
    UnsafeInteger,
    InvalidPageSize,
}

impl PaginateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PaginateError::InvalidCollection(_) => ErrorKind::InvalidCollection,
            PaginateError::NonInteger { .. } => ErrorKind::NonInteger,
            PaginateError::UnsafeInteger { .. } => ErrorKind::UnsafeInteger,
            PaginateError::InvalidPageSize(_) => ErrorKind::InvalidPageSize,
        }
    }
}

/// Failures surfaced by the command-line actions.
#[derive(Error, Debug)]
pub enum Error {
    #[error("i/o error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
    #[error("invalid json collection: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Paginate(#[from] PaginateError),
    #[error("config: {source}")]
    Config { source: io::Error },
    #[error("{failed} of {total} checks failed")]
    ChecksFailed { failed: usize, total: usize },
}
