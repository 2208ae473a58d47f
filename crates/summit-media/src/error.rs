//! Media pipeline error types.

use thiserror::Error;

use summit_storage::StorageError;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Command(#[from] StorageError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// `--upload-video` requires a configured uploader command.
    #[error("no video uploader command configured (media.uploader_command)")]
    NoUploader,

    /// The requested session id is not present in the latest export.
    #[error("unknown session id: {0}")]
    UnknownSession(String),
}

impl MediaError {
    /// Exit code the automation container should terminate with.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Command(inner) => inner.exit_code(),
            _ => 1,
        }
    }
}
