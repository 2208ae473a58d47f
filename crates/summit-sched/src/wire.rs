//! Wire types for the scheduling service's session export.
//!
//! The export is a flat JSON array of session records with nested speaker
//! and file lists. Field names and the naive local timestamps follow the
//! service, not Summit; mapping into [`summit_core::Session`] happens here.

use std::collections::BTreeMap;

use summit_core::{Session, SessionSlot, Speaker, session::sched_datetime};

#[derive(Debug, serde::Deserialize)]
pub struct WireSession {
    #[serde(default)]
    pub session_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub event_type: String,
    pub event_start: String,
    pub event_end: String,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub speakers: Vec<WireSpeaker>,
    #[serde(default)]
    pub files: Vec<WireFile>,
}

#[derive(Debug, serde::Deserialize)]
pub struct WireSpeaker {
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub about: String,
}

/// A file attached to a session (presentation slides, handouts, ...).
#[derive(Debug, Clone, serde::Deserialize)]
pub struct WireFile {
    pub name: String,
    pub path: String,
}

/// Map the export array into sessions keyed by canonical id.
///
/// Records without a session id cannot be referenced by any downstream step
/// and are skipped with a warning. Attached files are returned alongside,
/// keyed the same way.
pub fn map_export(
    records: Vec<WireSession>,
) -> (BTreeMap<String, Session>, BTreeMap<String, Vec<WireFile>>) {
    let mut sessions = BTreeMap::new();
    let mut files = BTreeMap::new();

    for record in records {
        if record.session_id.trim().is_empty() {
            tracing::warn!(name = %record.name, "skipping session without an id");
            continue;
        }

        let (Ok(start_time), Ok(end_time)) = (
            sched_datetime::parse(&record.event_start),
            sched_datetime::parse(&record.event_end),
        ) else {
            tracing::warn!(
                session_id = %record.session_id,
                "skipping session with unparseable time slot"
            );
            continue;
        };

        let key = record.session_id.to_uppercase();
        let session = Session {
            session_id: key.clone(),
            title: record.name,
            description: record.description,
            track: record.event_type,
            slot: SessionSlot {
                start_time,
                end_time,
            },
            room: record.venue.unwrap_or_default(),
            speakers: record
                .speakers
                .into_iter()
                .map(|s| Speaker {
                    name: s.name,
                    role: s.role,
                    company: s.company,
                    position: s.position,
                    avatar: s.avatar,
                    about: s.about,
                })
                .collect(),
        };

        if !record.files.is_empty() {
            files.insert(key.clone(), record.files);
        }
        sessions.insert(key, session);
    }

    (sessions, files)
}
