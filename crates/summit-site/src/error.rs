//! Site content error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A post file exists but its front-matter header cannot be located.
    #[error("malformed post (no front-matter fences): {0}")]
    MalformedPost(PathBuf),
}
