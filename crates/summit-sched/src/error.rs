//! Scheduling client error types.

use thiserror::Error;

/// Errors that can occur when talking to the scheduling service.
#[derive(Debug, Error)]
pub enum SchedError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Failed to parse a service response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Failed to write a downloaded file to disk.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
