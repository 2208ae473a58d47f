//! Local clone and change-branch management.
//!
//! State sequence per run:
//! 1. ensure the local clone exists (clone or fetch),
//! 2. checkout the default branch,
//! 3. reset the change branch onto it (`checkout -B`, covering both the
//!    pre-existing and the fresh case),
//! 4. caller mutates the working tree,
//! 5. [`WorkflowManager::finalize`] commits, pushes and ensures the PR,
//! 6. checkout the default branch again and delete the local change branch.
//!
//! No retry, no rollback: a failing git command surfaces immediately with
//! its exit code.

use std::path::{Path, PathBuf};

use summit_storage::CommandRunner;

use crate::error::GitError;
use crate::pr::{PrClient, PrSummary};

pub struct WorkflowManager {
    runner: CommandRunner,
    repo_dir: PathBuf,
    repo_url: String,
    default_branch: String,
    change_branch: String,
}

impl WorkflowManager {
    /// Set up a manager for the clone at `<work_dir>/website`.
    ///
    /// When `ssh_key` is given, every git command runs with a pinned
    /// `GIT_SSH_COMMAND` so the deploy key is used regardless of the
    /// container's ssh config.
    #[must_use]
    pub fn new(
        work_dir: &Path,
        repo_url: &str,
        default_branch: &str,
        change_branch: &str,
        ssh_key: Option<&Path>,
    ) -> Self {
        let repo_dir = work_dir.join("website");
        let mut runner = CommandRunner::with_cwd(&repo_dir);
        if let Some(key) = ssh_key {
            runner = runner.env(
                "GIT_SSH_COMMAND",
                format!(
                    "ssh -i {} -o IdentitiesOnly=yes -o StrictHostKeyChecking=no",
                    key.display()
                ),
            );
        }

        Self {
            runner,
            repo_dir,
            repo_url: repo_url.to_string(),
            default_branch: default_branch.to_string(),
            change_branch: change_branch.to_string(),
        }
    }

    /// Path of the local clone.
    #[must_use]
    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    /// Sync the clone and reset the change branch onto the default branch.
    pub async fn prepare(&self) -> Result<(), GitError> {
        if self.repo_dir.join(".git").is_dir() {
            // Guard against a half-written directory from an aborted run.
            gix::open(&self.repo_dir)
                .map_err(|_| GitError::NotARepo(self.repo_dir.clone()))?;

            self.git(["fetch", "origin"]).await?;
            self.git(["checkout", self.default_branch.as_str()]).await?;
            self.git([
                "reset",
                "--hard",
                &format!("origin/{}", self.default_branch),
            ])
            .await?;
        } else {
            tracing::info!(url = %self.repo_url, "cloning website repository");
            let parent = self
                .repo_dir
                .parent()
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            std::fs::create_dir_all(&parent)?;

            let clone_runner = self.runner.clone_with_cwd(&parent);
            clone_runner
                .run("git", ["clone", self.repo_url.as_str(), "website"])
                .await?;
            self.git(["checkout", self.default_branch.as_str()]).await?;
        }

        // Reset-or-create in one step; the branch always starts from the
        // tip of the default branch.
        self.git(["checkout", "-B", self.change_branch.as_str()])
            .await?;
        Ok(())
    }

    /// Whether the working tree has staged, unstaged or untracked changes.
    pub async fn is_dirty(&self) -> Result<bool, GitError> {
        let output = self.git(["status", "--porcelain"]).await?;
        Ok(!output.trim().is_empty())
    }

    /// Branch the clone currently has checked out.
    pub fn current_branch(&self) -> Result<String, GitError> {
        let repo =
            gix::open(&self.repo_dir).map_err(|_| GitError::NotARepo(self.repo_dir.clone()))?;
        Ok(repo
            .head_name()
            .ok()
            .flatten()
            .map(|name| name.shorten().to_string())
            .unwrap_or_default())
    }

    /// Commit and push the working tree, then ensure the pull request.
    ///
    /// Returns `None` (after cleanup) when the tree is clean: an unchanged
    /// data pull must not produce a commit or a PR. The push is forced;
    /// the branch was reset from the default branch and any remote state is
    /// a leftover from an earlier run.
    pub async fn finalize(
        &self,
        pr: &PrClient,
        title: &str,
        body: &str,
    ) -> Result<Option<PrSummary>, GitError> {
        if !self.is_dirty().await? {
            tracing::info!("no changes to push");
            self.cleanup().await?;
            return Ok(None);
        }

        self.git(["add", "-A"]).await?;
        self.git(["commit", "-m", title]).await?;
        self.git([
            "push",
            "--force",
            "origin",
            self.change_branch.as_str(),
        ])
        .await?;

        let summary = pr
            .ensure_open(&self.change_branch, &self.default_branch, title, body)
            .await?;

        self.cleanup().await?;
        Ok(Some(summary))
    }

    /// Leave the clone on the default branch with the change branch gone.
    pub async fn cleanup(&self) -> Result<(), GitError> {
        self.git(["checkout", self.default_branch.as_str()]).await?;
        self.git(["branch", "-D", self.change_branch.as_str()])
            .await?;
        Ok(())
    }

    async fn git<'a>(
        &self,
        args: impl IntoIterator<Item = &'a str>,
    ) -> Result<String, GitError> {
        Ok(self.runner.run("git", args).await?)
    }
}
