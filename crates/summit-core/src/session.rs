use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One scheduled conference talk/event record, sourced verbatim from the
/// scheduling API. Immutable within a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub session_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Event type doubles as the track name on the website.
    pub track: String,
    pub slot: SessionSlot,
    /// Room name. Empty when the scheduling data has no venue yet.
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub speakers: Vec<Speaker>,
}

impl Session {
    /// Canonical (upper-case) session id.
    #[must_use]
    pub fn canonical_id(&self) -> String {
        self.session_id.to_uppercase()
    }

    /// Session id as used in file names and URLs.
    #[must_use]
    pub fn file_id(&self) -> String {
        self.session_id.to_lowercase()
    }
}

/// Time slot of a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionSlot {
    #[serde(with = "sched_datetime")]
    pub start_time: NaiveDateTime,
    #[serde(with = "sched_datetime")]
    pub end_time: NaiveDateTime,
}

/// A speaker record nested within a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Speaker {
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

impl Speaker {
    /// Human-readable role line used in video descriptions:
    /// `Position at Company`, falling back to whichever side is present.
    #[must_use]
    pub fn role_line(&self) -> String {
        match (self.position.is_empty(), self.company.is_empty()) {
            (false, false) => format!("{} at {}", self.position, self.company),
            (false, true) => self.position.clone(),
            (true, false) => self.company.clone(),
            (true, true) => String::new(),
        }
    }
}

/// Serde adapter for the scheduling service's naive local timestamps.
///
/// The export endpoint emits `2019-09-23 14:00:00`; older exports drop the
/// seconds, so parsing accepts both.
pub mod sched_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";
    const FORMAT_SHORT: &str = "%Y-%m-%d %H:%M";

    pub fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    /// Parse a scheduling-service timestamp.
    pub fn parse(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(raw, FORMAT_SHORT))
    }
}
