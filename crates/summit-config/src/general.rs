//! General run configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default scratch directory for one run.
fn default_work_dir() -> String {
    String::from("work_dir")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Scratch root owned by a single run: clones, downloads, generated
    /// images and secret files all live under here.
    #[serde(default = "default_work_dir")]
    pub work_dir: String,

    /// Session id for single-video runs (`--upload-video`).
    #[serde(default)]
    pub session_id: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            work_dir: default_work_dir(),
            session_id: String::new(),
        }
    }
}

impl GeneralConfig {
    /// The scratch root as a path.
    #[must_use]
    pub fn work_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir)
    }
}
