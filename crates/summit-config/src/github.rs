//! Website-repository and pull-request configuration.

use serde::{Deserialize, Serialize};

/// Default branch of the website repository.
fn default_branch() -> String {
    String::from("master")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubConfig {
    /// Clone URL of the website repository (SSH when a deploy key is used).
    #[serde(default)]
    pub repo_url: String,

    /// Repository owner used for REST calls.
    #[serde(default)]
    pub owner: String,

    /// Repository name used for REST calls.
    #[serde(default)]
    pub repo: String,

    /// API token for pull-request calls.
    #[serde(default)]
    pub token: String,

    /// Private deploy key material. When set, it is written into the work
    /// directory and pinned via `GIT_SSH_COMMAND` for every git command.
    #[serde(default)]
    pub ssh_key: String,

    /// Logins to request reviews from on created pull requests.
    #[serde(default)]
    pub reviewers: Vec<String>,

    /// Default branch the change branch tracks and PRs target.
    #[serde(default = "default_branch")]
    pub default_branch: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            repo_url: String::new(),
            owner: String::new(),
            repo: String::new(),
            token: String::new(),
            ssh_key: String::new(),
            reviewers: Vec::new(),
            default_branch: default_branch(),
        }
    }
}

impl GitHubConfig {
    /// Check the minimum required fields for the PR workflow.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.repo_url.is_empty()
            && !self.owner.is_empty()
            && !self.repo.is_empty()
            && !self.token.is_empty()
    }

    /// Name of the single change branch staging automated updates.
    #[must_use]
    pub fn change_branch(&self, event_code: &str) -> String {
        format!("{}-session-update", event_code.to_lowercase())
    }
}
