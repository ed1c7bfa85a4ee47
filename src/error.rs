//! Error types for tempagg
//!
//! Every failure is fatal for the run: the error is propagated to the caller and no partial table
//! is ever returned.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for aggregation runs
#[derive(Error, Debug)]
pub enum Error {
    /// The input could not be opened
    #[error("cannot access input {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The size of the input could not be determined
    #[error("cannot determine input size: {0}")]
    Size(#[source] io::Error),

    /// Reading failed while looking for a line terminator to place a chunk boundary
    #[error("i/o error while scanning for a line boundary at byte {offset}: {source}")]
    BoundaryScan {
        offset: u64,
        #[source]
        source: io::Error,
    },

    /// The indexer produced chunks that do not partition the input. This is a bug, not bad input.
    #[error("inconsistent chunk partition: {0}")]
    Partition(String),

    /// A line could not be decoded into a `key;value` record
    #[error("malformed record at byte {offset}: {kind}")]
    MalformedRecord { offset: u64, kind: RecordError },

    /// Reading failed while streaming a chunk
    #[error("i/o error while reading chunk data at byte {offset}: {source}")]
    ChunkRead {
        offset: u64,
        #[source]
        source: io::Error,
    },

    /// A worker went away without delivering its result
    #[error("expected {expected} chunk results, received {received}")]
    Incomplete { expected: usize, received: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Why a single line was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected 2 `;`-separated fields, found {found}")]
    FieldCount { found: usize },

    #[error("invalid temperature {text:?}")]
    InvalidNumber { text: String },

    #[error("record is not valid UTF-8")]
    NotUtf8,
}

/// Result type alias for tempagg operations
pub type Result<T> = std::result::Result<T, Error>;
