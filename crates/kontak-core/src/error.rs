//! Error types for kontak-core

use thiserror::Error;

/// Result type alias for kontak-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in kontak-core
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A contact id could not be parsed
    #[error("Invalid contact id '{value}': {source}")]
    InvalidId {
        /// The rejected input
        value: String,
        /// Underlying parse failure
        #[source]
        source: uuid::Error,
    },

    /// A required contact field is empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

impl Error {
    /// Creates an invalid-id error.
    pub fn invalid_id<S: Into<String>>(value: S, source: uuid::Error) -> Self {
        Error::InvalidId {
            value: value.into(),
            source,
        }
    }
}
