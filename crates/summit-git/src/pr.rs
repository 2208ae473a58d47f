//! Pull-request operations against the GitHub REST API.
//!
//! The at-most-one-open invariant lives here: before creating a PR for the
//! change branch, open PRs with that head are looked up and reused.

use crate::error::GitError;

/// Outcome of the PR step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrSummary {
    pub number: u64,
    pub url: String,
    /// False when an open PR for the change branch already existed.
    pub created: bool,
}

pub struct PrClient {
    octo: octocrab::Octocrab,
    owner: String,
    repo: String,
    reviewers: Vec<String>,
}

impl PrClient {
    /// Build a client from a personal access token.
    pub fn new(
        token: &str,
        owner: &str,
        repo: &str,
        reviewers: &[String],
    ) -> Result<Self, GitError> {
        let octo = octocrab::Octocrab::builder()
            .personal_token(token.to_string())
            .build()?;
        Ok(Self {
            octo,
            owner: owner.to_string(),
            repo: repo.to_string(),
            reviewers: reviewers.to_vec(),
        })
    }

    /// Same as [`PrClient::new`] but against a non-default API endpoint
    /// (GitHub Enterprise, or an in-test stub server).
    pub fn with_base_uri(
        base_uri: &str,
        token: &str,
        owner: &str,
        repo: &str,
        reviewers: &[String],
    ) -> Result<Self, GitError> {
        let octo = octocrab::Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(base_uri)?
            .build()?;
        Ok(Self {
            octo,
            owner: owner.to_string(),
            repo: repo.to_string(),
            reviewers: reviewers.to_vec(),
        })
    }

    /// Ensure exactly one open PR exists for `head`.
    ///
    /// Reuses an already-open PR; otherwise creates one and requests the
    /// configured reviewers. A failing review request is logged but does
    /// not fail the run (the PR itself exists at that point).
    pub async fn ensure_open(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<PrSummary, GitError> {
        let pulls = self.octo.pulls(&self.owner, &self.repo);

        let existing = pulls
            .list()
            .state(octocrab::params::State::Open)
            .head(format!("{}:{head}", self.owner))
            .per_page(1)
            .send()
            .await?;

        if let Some(pr) = existing.items.first() {
            tracing::info!(number = pr.number, "open PR for change branch already exists");
            return Ok(PrSummary {
                number: pr.number,
                url: pr.html_url.as_ref().map(ToString::to_string).unwrap_or_default(),
                created: false,
            });
        }

        let pr = pulls.create(title, head, base).body(body).send().await?;
        let url = pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        tracing::info!(number = pr.number, %url, "pull request created");

        if !self.reviewers.is_empty() {
            if let Err(error) = pulls
                .request_reviews(pr.number, self.reviewers.clone(), Vec::<String>::new())
                .await
            {
                tracing::warn!(%error, "failed to request reviewers");
            }
        }

        Ok(PrSummary {
            number: pr.number,
            url,
            created: true,
        })
    }
}
