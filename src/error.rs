//! Error types for newsdoc operations.

use thiserror::Error;

/// Errors that abort compilation of a document.
///
/// Editorial problems (unknown directive tables, missing images, unbalanced
/// embed markup) are never errors; they are reported as warnings in the
/// [`Bundle`](crate::Bundle).
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not find <body> in document")]
    MissingBody,

    #[error("document unexpectedly contains <data> element: {0}")]
    UnexpectedDataElement(String),

    #[error("could not decode embed payload: {0}")]
    EmbedDecode(#[from] serde_json::Error),

    #[error("unprocessed placeholder element: {0}")]
    UnresolvedPlaceholder(String),
}

pub type Result<T> = std::result::Result<T, Error>;
