//! Storage and command-execution error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// The command could not be spawned at all.
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran and exited non-zero. `code` is the child's exit code
    /// and becomes the process exit code of the whole run.
    #[error("'{program}' failed with exit code {code}")]
    CommandFailed { program: String, code: i32 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Exit code the automation container should terminate with.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::CommandFailed { code, .. } => *code,
            _ => 1,
        }
    }
}
