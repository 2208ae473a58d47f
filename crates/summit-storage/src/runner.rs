//! Shared external command runner.
//!
//! Every shell-out in the workspace (`git`, `aws`, ImageMagick, the video
//! uploader) goes through here: stdout and stderr are captured and logged,
//! and a non-zero exit becomes a [`StorageError::CommandFailed`] carrying
//! the child's exit code.

use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;

use crate::error::StorageError;

#[derive(Debug, Clone, Default)]
pub struct CommandRunner {
    cwd: Option<PathBuf>,
    envs: Vec<(String, String)>,
}

impl CommandRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run all commands from `dir` instead of the process working directory.
    #[must_use]
    pub fn with_cwd(dir: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(dir.into()),
            envs: Vec::new(),
        }
    }

    /// Add an environment variable for every spawned command.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Copy of this runner with the same environment but a different
    /// working directory.
    #[must_use]
    pub fn clone_with_cwd(&self, dir: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(dir.into()),
            envs: self.envs.clone(),
        }
    }

    /// Execute a command to completion, returning its combined output.
    ///
    /// # Errors
    ///
    /// [`StorageError::Spawn`] when the program cannot be started,
    /// [`StorageError::CommandFailed`] (with the child's exit code) when it
    /// exits non-zero.
    pub async fn run<I, S>(&self, program: &str, args: I) -> Result<String, StorageError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(dir) = &self.cwd {
            command.current_dir(dir);
        }
        for (key, value) in &self.envs {
            command.env(key, value);
        }

        tracing::debug!(program, "executing command");
        let output = command.output().await.map_err(|source| StorageError::Spawn {
            program: program.to_string(),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if output.status.success() {
            if !stdout.trim().is_empty() {
                tracing::debug!(program, output = %stdout.trim(), "command output");
            }
            Ok(format!("{stdout}{stderr}"))
        } else {
            let code = output.status.code().unwrap_or(1);
            tracing::error!(program, code, stdout = %stdout.trim(), stderr = %stderr.trim(), "command failed");
            Err(StorageError::CommandFailed {
                program: program.to_string(),
                code,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn captures_stdout() {
        let runner = CommandRunner::new();
        let output = runner.run("sh", ["-c", "echo hello"]).await.unwrap();
        assert_eq!(output.trim(), "hello");
    }

    #[tokio::test]
    async fn non_zero_exit_preserves_code() {
        let runner = CommandRunner::new();
        let err = runner.run("sh", ["-c", "exit 42"]).await.unwrap_err();
        match err {
            StorageError::CommandFailed { code, .. } => assert_eq!(code, 42),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(
            StorageError::CommandFailed {
                program: "sh".into(),
                code: 42
            }
            .exit_code(),
            42
        );
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let runner = CommandRunner::new();
        let err = runner
            .run("summit-definitely-missing-binary", ["x"])
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Spawn { .. }));
    }

    #[tokio::test]
    async fn cwd_and_env_are_applied() {
        let dir = tempfile::tempdir().unwrap();
        let runner = CommandRunner::with_cwd(dir.path()).env("SUMMIT_TEST_VAR", "42");
        let output = runner
            .run("sh", ["-c", "pwd && printf '%s' \"$SUMMIT_TEST_VAR\""])
            .await
            .unwrap();
        assert!(output.contains("42"));
    }
}
