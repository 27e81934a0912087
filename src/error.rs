//! Error types for ledger ingestion and component selection.
//!
//! Every error here is fatal: karmap is a single-pass batch tool, so a
//! half-built graph or a partially drawn image has no meaning. Errors carry
//! enough context (line number, offending name/token) to fix the input.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while turning a ledger file into a rendered graph.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The ledger file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data row did not split into the expected nine fields.
    #[error("line {line}: expected 9 semicolon-separated fields, found {found}")]
    MalformedRow { line: usize, found: usize },

    /// A karma field was neither a sentinel token nor a parseable number.
    #[error("line {line}: invalid karma token {token:?} for {name:?}")]
    InvalidKarma {
        line: usize,
        name: String,
        token: String,
    },

    /// The requested weakly-connected component does not exist.
    #[error("component {rank} not available: graph has {available} component(s)")]
    EmptyComponent { rank: usize, available: usize },
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
