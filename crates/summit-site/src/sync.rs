//! Idempotent post synchronization.
//!
//! Mirrors the latest data pull onto the posts directory:
//! - a session seen for the first time gets a new dated file,
//! - a session whose computed header differs from the one on disk is
//!   rewritten at its existing path,
//! - a file whose session disappeared from the pull is deleted.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use summit_core::{Session, extract_session_id};

use crate::error::SiteError;
use crate::front_matter::FrontMatter;

/// Files touched by one sync pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChangeSet {
    pub created: Vec<PathBuf>,
    pub updated: Vec<PathBuf>,
    pub deleted: Vec<PathBuf>,
}

impl ChangeSet {
    /// Whether the pass touched anything at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }
}

/// Synchronize the posts directory with the latest session pull.
///
/// `today` becomes the date prefix of newly created files; existing files
/// keep their original name when rewritten.
pub fn sync_posts(
    sessions: &BTreeMap<String, Session>,
    posts_dir: &Path,
    event_code: &str,
    today: NaiveDate,
) -> Result<ChangeSet, SiteError> {
    std::fs::create_dir_all(posts_dir)?;
    let existing = index_existing_posts(posts_dir, event_code)?;

    let mut changes = ChangeSet::default();

    for session in sessions.values() {
        let header = FrontMatter::from_session(session, event_code);

        if let Some(path) = existing.get(&session.canonical_id()) {
            let content = std::fs::read_to_string(path)?;
            let on_disk = FrontMatter::parse(&content, path).ok();

            if on_disk.as_ref() == Some(&header) {
                continue;
            }

            tracing::info!(session_id = %session.session_id, "updating post");
            std::fs::write(path, header.render("")?)?;
            changes.updated.push(path.clone());
        } else {
            let file_name = format!("{}-{}.md", today.format("%Y-%m-%d"), session.file_id());
            let path = posts_dir.join(file_name);

            tracing::info!(session_id = %session.session_id, "writing new post");
            std::fs::write(&path, header.render("")?)?;
            changes.created.push(path);
        }
    }

    // Delete posts whose sessions no longer exist in the latest export.
    for (session_id, path) in &existing {
        if !sessions.contains_key(session_id) {
            tracing::info!(session_id, path = %path.display(), "deleting removed session post");
            std::fs::remove_file(path)?;
            changes.deleted.push(path.clone());
        }
    }

    Ok(changes)
}

/// Map existing post files to their session ids.
///
/// Files that carry no recognizable session id are left alone (and warned
/// about) rather than treated as removable.
fn index_existing_posts(
    posts_dir: &Path,
    event_code: &str,
) -> Result<BTreeMap<String, PathBuf>, SiteError> {
    let mut index = BTreeMap::new();

    for entry in std::fs::read_dir(posts_dir)? {
        let path = entry?.path();
        if path.extension().and_then(|v| v.to_str()) != Some("md") {
            continue;
        }

        let name = path
            .file_name()
            .and_then(|v| v.to_str())
            .unwrap_or_default();
        match extract_session_id(name, event_code) {
            Some(session_id) => {
                index.insert(session_id, path);
            }
            None => {
                tracing::warn!(file = %path.display(), "post without a session id, skipping");
            }
        }
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use summit_core::{SessionSlot, session::sched_datetime};

    use super::*;

    fn session(id: &str, title: &str) -> Session {
        Session {
            session_id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            track: "Testing".to_string(),
            slot: SessionSlot {
                start_time: sched_datetime::parse("2019-09-23 14:00:00").unwrap(),
                end_time: sched_datetime::parse("2019-09-23 14:25:00").unwrap(),
            },
            room: String::new(),
            speakers: vec![],
        }
    }

    fn pull(sessions: &[Session]) -> BTreeMap<String, Session> {
        sessions
            .iter()
            .map(|s| (s.canonical_id(), s.clone()))
            .collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 9, 1).unwrap()
    }

    #[test]
    fn first_sync_creates_dated_files() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = pull(&[session("SAN19-210", "Talk A"), session("SAN19-211", "Talk B")]);

        let changes = sync_posts(&sessions, dir.path(), "SAN19", today()).unwrap();
        assert_eq!(changes.created.len(), 2);
        assert!(changes.updated.is_empty());
        assert!(dir.path().join("2019-09-01-san19-210.md").is_file());
    }

    #[test]
    fn second_sync_with_same_data_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = pull(&[session("SAN19-210", "Talk A")]);

        sync_posts(&sessions, dir.path(), "SAN19", today()).unwrap();
        let changes = sync_posts(&sessions, dir.path(), "SAN19", today()).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn changed_title_rewrites_at_existing_path() {
        let dir = tempfile::tempdir().unwrap();
        sync_posts(&pull(&[session("SAN19-210", "Old title")]), dir.path(), "SAN19", today())
            .unwrap();

        let later = NaiveDate::from_ymd_opt(2019, 9, 15).unwrap();
        let changes = sync_posts(
            &pull(&[session("SAN19-210", "New title")]),
            dir.path(),
            "SAN19",
            later,
        )
        .unwrap();

        assert_eq!(changes.updated.len(), 1);
        assert!(changes.created.is_empty());
        // Original file name (and date prefix) is preserved.
        assert!(dir.path().join("2019-09-01-san19-210.md").is_file());
        let content =
            std::fs::read_to_string(dir.path().join("2019-09-01-san19-210.md")).unwrap();
        assert!(content.contains("New title"));
    }

    #[test]
    fn removed_session_deletes_its_post() {
        let dir = tempfile::tempdir().unwrap();
        sync_posts(
            &pull(&[session("SAN19-210", "A"), session("SAN19-211", "B")]),
            dir.path(),
            "SAN19",
            today(),
        )
        .unwrap();

        let changes =
            sync_posts(&pull(&[session("SAN19-210", "A")]), dir.path(), "SAN19", today()).unwrap();
        assert_eq!(changes.deleted.len(), 1);
        assert!(!dir.path().join("2019-09-01-san19-211.md").exists());
    }

    #[test]
    fn unrelated_markdown_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("about.md"), "# About\n").unwrap();

        let changes = sync_posts(&pull(&[]), dir.path(), "SAN19", today()).unwrap();
        assert!(changes.is_empty());
        assert!(dir.path().join("about.md").is_file());
    }
}
