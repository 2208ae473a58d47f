//! Event resources summary.
//!
//! One JSON document per event, keyed by canonical session id, mirrored to
//! the bucket alongside the uploaded assets so other tools can read the
//! latest session data without talking to the scheduling service. Writing
//! is diff-driven like the posts sync: the file is only rewritten when the
//! serialized form changes.

use std::collections::BTreeMap;
use std::path::Path;

use summit_core::Session;

use crate::error::SiteError;

/// Write the sessions summary, returning whether the file changed.
pub fn write_resources_json(
    sessions: &BTreeMap<String, Session>,
    path: &Path,
) -> Result<bool, SiteError> {
    let mut rendered = serde_json::to_vec_pretty(sessions)?;
    rendered.push(b'\n');

    if let Ok(existing) = std::fs::read(path) {
        if existing == rendered {
            return Ok(false);
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, rendered)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use summit_core::{SessionSlot, session::sched_datetime};

    use super::*;

    fn sessions(title: &str) -> BTreeMap<String, Session> {
        let session = Session {
            session_id: "SAN19-210".to_string(),
            title: title.to_string(),
            description: String::new(),
            track: "Testing".to_string(),
            slot: SessionSlot {
                start_time: sched_datetime::parse("2019-09-23 14:00:00").unwrap(),
                end_time: sched_datetime::parse("2019-09-23 14:25:00").unwrap(),
            },
            room: String::new(),
            speakers: vec![],
        };
        BTreeMap::from([(session.canonical_id(), session)])
    }

    #[test]
    fn first_write_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resources.json");

        assert!(write_resources_json(&sessions("Talk"), &path).unwrap());
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["SAN19-210"]["title"], "Talk");
    }

    #[test]
    fn unchanged_data_does_not_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resources.json");

        assert!(write_resources_json(&sessions("Talk"), &path).unwrap());
        assert!(!write_resources_json(&sessions("Talk"), &path).unwrap());
    }

    #[test]
    fn changed_data_rewrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resources.json");

        write_resources_json(&sessions("Old"), &path).unwrap();
        assert!(write_resources_json(&sessions("New"), &path).unwrap());
        assert!(std::fs::read_to_string(&path).unwrap().contains("New"));
    }
}
