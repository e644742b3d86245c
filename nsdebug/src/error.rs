//! Error types for nsdebug.
//!
//! None of these reach the caller of a channel: emitting never fails. They
//! exist so [`Storage`](crate::storage::Storage) and [`Sink`](crate::sink::Sink)
//! implementations can report what went wrong before the context swallows it.

use std::io;
use thiserror::Error;

/// Main error type for nsdebug operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Persistence store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Output sink errors
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// Filter pattern errors
    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),
}

/// Errors from the durable key-value store holding the filter string.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The store is disabled or missing entirely
    #[error("Storage unavailable")]
    Unavailable,

    /// The store can be read but not written
    #[error("Storage is read-only, cannot write key '{key}'")]
    ReadOnly { key: String },

    /// Key contains characters the store cannot represent
    #[error("Invalid storage key '{key}'")]
    InvalidKey { key: String },

    /// Stored value is not valid text
    #[error("Stored value for '{key}' is not valid UTF-8")]
    NotUnicode { key: String },

    /// I/O failure while accessing the store
    #[error("I/O error on key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
}

/// Errors from the output sink.
#[derive(Error, Debug)]
pub enum SinkError {
    /// No sink is attached to the context
    #[error("No sink attached")]
    Missing,

    /// Writing to the sink failed
    #[error("Write failed: {0}")]
    Io(#[from] io::Error),
}

/// Filter pattern compilation errors.
#[derive(Error, Debug)]
pub enum PatternError {
    /// The glob expanded to a regex the engine rejected
    #[error("Invalid pattern '{glob}': {source}")]
    Invalid {
        glob: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type alias using nsdebug's Error.
pub type Result<T> = std::result::Result<T, Error>;
