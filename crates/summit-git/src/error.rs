//! Git workflow error types.

use std::path::PathBuf;

use thiserror::Error;

use summit_storage::StorageError;

#[derive(Debug, Error)]
pub enum GitError {
    /// A git command failed; carries the child's exit code.
    #[error(transparent)]
    Command(#[from] StorageError),

    /// The clone directory exists but is not a git repository.
    #[error("not a git repository: {0}")]
    NotARepo(PathBuf),

    /// GitHub REST API failure.
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl GitError {
    /// Exit code the automation container should terminate with.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Command(inner) => inner.exit_code(),
            _ => 1,
        }
    }
}
