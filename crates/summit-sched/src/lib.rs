//! # summit-sched
//!
//! HTTP client for the conference scheduling service. Fetches the session
//! export used as the data source by every other Summit crate, and downloads
//! per-session attachments (presentations and other files).

mod client;
mod error;
mod files;
mod http;
mod wire;

pub use client::SchedClient;
pub use error::SchedError;
pub use files::{DownloadSummary, download_files};
pub use wire::WireFile;
