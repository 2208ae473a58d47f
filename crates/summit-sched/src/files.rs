//! Per-session attachment downloads.
//!
//! Presentations (PDFs) and other attached files are mirrored into two local
//! directories, named `<SESSION-ID>-<slug>.<ext>` so the storage sync can
//! scope uploads with an event-code filter. Files already on disk are
//! skipped, keeping repeated runs cheap.

use std::path::Path;

use crate::client::SchedClient;
use crate::error::SchedError;
use crate::http::check_response;

/// Counters for one download pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DownloadSummary {
    pub presentations: usize,
    pub other: usize,
    pub skipped: usize,
}

/// Download every attached file from the last export.
///
/// # Errors
///
/// Fails on the first HTTP or filesystem error; already-written files stay
/// on disk.
pub async fn download_files(
    client: &SchedClient,
    presentations_dir: &Path,
    other_dir: &Path,
) -> Result<DownloadSummary, SchedError> {
    std::fs::create_dir_all(presentations_dir)?;
    std::fs::create_dir_all(other_dir)?;

    let mut summary = DownloadSummary::default();

    for (session_id, files) in client.all_files() {
        for file in files {
            let Some(ext) = file_extension(&file.path) else {
                tracing::warn!(session_id, path = %file.path, "attachment without extension");
                continue;
            };

            let file_name = format!(
                "{}-{}.{}",
                session_id,
                summit_core::slugify(&file.name),
                ext
            );
            let is_presentation = ext.eq_ignore_ascii_case("pdf");
            let target_dir = if is_presentation {
                presentations_dir
            } else {
                other_dir
            };
            let target = target_dir.join(&file_name);

            if target.is_file() {
                summary.skipped += 1;
                continue;
            }

            tracing::info!(session_id, file = %file_name, "downloading attachment");
            let resp = check_response(client.http().get(&file.path).send().await?).await?;
            let bytes = resp.bytes().await?;
            std::fs::write(&target, &bytes)?;

            if is_presentation {
                summary.presentations += 1;
            } else {
                summary.other += 1;
            }
        }
    }

    Ok(summary)
}

/// Extension of the last path segment of a URL, query string stripped.
fn file_extension(url: &str) -> Option<&str> {
    let no_query = url.split(['?', '#']).next().unwrap_or(url);
    let segment = no_query.rsplit('/').next().unwrap_or(no_query);
    let (_, ext) = segment.rsplit_once('.')?;
    if ext.is_empty() || ext.len() > 8 {
        None
    } else {
        Some(ext)
    }
}
