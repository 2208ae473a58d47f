//! # summit-git
//!
//! Repository-state synchronization and pull-request workflow. One change
//! branch per run, reset from the upstream default branch at the start,
//! deleted locally once the PR step completes. Mutations shell out to the
//! `git` CLI through the shared command runner; read-only inspection uses
//! gix; pull requests go through the GitHub REST API.

mod error;
mod pr;
mod workflow;

pub use error::GitError;
pub use pr::{PrClient, PrSummary};
pub use workflow::WorkflowManager;
