//! Error types for kontak-web

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

/// Result type alias for kontak-web operations
pub type Result<T> = std::result::Result<T, Error>;

/// Body of the generic failure page.
pub const SERVER_ERROR_BODY: &str = "<h1>500</h1>";

/// Errors that can occur in kontak-web
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from kontak-core
    #[error("Core error: {0}")]
    Core(#[from] kontak_core::Error),

    /// Error from kontak-storage
    #[error("Storage error: {0}")]
    Storage(#[from] kontak_storage::Error),

    /// A view failed to load or render
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Configuration is missing or malformed
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error (binding the listener, reading config files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Html(SERVER_ERROR_BODY)).into_response()
    }
}
