//! Task orchestration.
//!
//! Each task is a linear pipeline over the library crates; the first failing
//! step aborts the run and its exit code becomes the process exit code.

mod daily;
mod media;
mod uploads;

pub use daily::{daily_tasks, update_session};
pub use media::{social_images, upload_video};
pub use uploads::upload_presentations;

use std::path::{Path, PathBuf};

use summit_config::SummitConfig;
use summit_git::{PrClient, WorkflowManager};
use summit_sched::SchedClient;
use summit_storage::{CommandRunner, S3Sync};

/// Shared state for one task run.
pub struct TaskContext {
    pub config: SummitConfig,
    pub runner: CommandRunner,
    pub http: reqwest::Client,
    pub no_upload: bool,
    pub quiet: bool,
}

impl TaskContext {
    #[must_use]
    pub fn new(config: SummitConfig, no_upload: bool, quiet: bool) -> Self {
        Self {
            config,
            runner: CommandRunner::new(),
            http: reqwest::Client::new(),
            no_upload,
            quiet,
        }
    }

    pub fn work_dir(&self) -> PathBuf {
        self.config.general.work_dir_path()
    }

    /// Generated share cards and their resized variants.
    pub fn images_dir(&self) -> PathBuf {
        self.work_dir().join("images")
    }

    pub fn presentations_dir(&self) -> PathBuf {
        self.work_dir().join("presentations")
    }

    pub fn other_files_dir(&self) -> PathBuf {
        self.work_dir().join("other_files")
    }

    pub fn videos_dir(&self) -> PathBuf {
        self.work_dir().join("videos")
    }

    /// Session content files inside the website clone.
    pub fn posts_dir(&self, repo_dir: &Path) -> PathBuf {
        repo_dir
            .join("_posts")
            .join(self.config.event.code_lower())
            .join("sessions")
    }

    /// Share images inside the website clone, served by the site itself.
    pub fn site_images_dir(&self, repo_dir: &Path) -> PathBuf {
        repo_dir
            .join("assets/images/featured-images")
            .join(self.config.event.code_lower())
    }

    pub fn sched_client(&self) -> SchedClient {
        SchedClient::new(&self.config.event.sched_url, &self.config.event.sched_api_key)
    }

    pub fn s3(&self) -> S3Sync<'_> {
        S3Sync::new(
            &self.runner,
            &self.config.storage,
            &self.config.event.code,
            self.no_upload,
        )
    }

    /// Build the git workflow manager, materializing the deploy key into
    /// the work directory when one is configured.
    pub fn workflow(&self) -> anyhow::Result<WorkflowManager> {
        let work_dir = self.work_dir();
        std::fs::create_dir_all(&work_dir)?;

        let ssh_key = if self.config.github.ssh_key.is_empty() {
            None
        } else {
            Some(summit_secrets::materialize(
                &work_dir,
                "deploy_key",
                &self.config.github.ssh_key,
            )?)
        };

        Ok(WorkflowManager::new(
            &work_dir,
            &self.config.github.repo_url,
            &self.config.github.default_branch,
            &self
                .config
                .github
                .change_branch(&self.config.event.code),
            ssh_key.as_deref(),
        ))
    }

    pub fn pr_client(&self) -> anyhow::Result<PrClient> {
        Ok(PrClient::new(
            &self.config.github.token,
            &self.config.github.owner,
            &self.config.github.repo,
            &self.config.github.reviewers,
        )?)
    }
}
