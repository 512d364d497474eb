//! Core library behind the `crawler`, `indexer` and `query` binaries.
//!
//! Three pipeline stages share this crate's on-disk contracts: the crawler
//! writes numbered page files into a page directory, the indexer reads that
//! directory and writes an inverted index file, and the query engine reads
//! both to answer boolean queries interactively.

pub mod crawler;
pub mod index;
pub mod indexer;
pub mod logging;
pub mod page;
pub mod query;
pub mod webpage;

use thiserror::Error;

/// Main error type shared across the crawler, indexer and query binaries.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("failed to parse URL: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("page {doc_id} is corrupt: {reason}")]
    InvalidPageRecord { doc_id: u32, reason: String },

    #[error("corrupt index line: {line:?}")]
    CorruptIndexLine { line: String },

    #[error("{0}")]
    Startup(String),
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CoreError>;
