//! Error types for kontak-storage

use thiserror::Error;

/// Result type alias for kontak-storage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in kontak-storage
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from kontak-core
    #[error("Core error: {0}")]
    Core(#[from] kontak_core::Error),

    /// Error from the embedded database
    #[error("Database error: {0}")]
    Database(#[from] redb::Error),

    /// Filesystem error while preparing the database file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored document could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A blocking storage task was cancelled or panicked
    #[error("Storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// The database URL names no known backend
    #[error("Invalid database URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected URL
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// The backend is unreachable or refused the operation
    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}

impl Error {
    /// Creates an invalid-URL error.
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unavailable-backend error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Error::Unavailable(message.into())
    }

    /// Wraps any redb error type.
    pub(crate) fn db(err: impl Into<redb::Error>) -> Self {
        Error::Database(err.into())
    }
}
