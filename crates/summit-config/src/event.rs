//! Event and scheduling-service configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EventConfig {
    /// Event code, e.g. `SAN19`. Upper-case canonical.
    #[serde(default)]
    pub code: String,

    /// Base URL of the scheduling service for this event.
    #[serde(default)]
    pub sched_url: String,

    /// API key for the scheduling service export endpoint.
    #[serde(default)]
    pub sched_api_key: String,

    /// Public website base URL, used for session page links.
    #[serde(default)]
    pub website_url: String,
}

impl EventConfig {
    /// Check that the scheduling data source can be reached.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.code.is_empty() && !self.sched_url.is_empty() && !self.sched_api_key.is_empty()
    }

    /// Event code as used in bucket keys, branch names and file names.
    #[must_use]
    pub fn code_lower(&self) -> String {
        self.code.to_lowercase()
    }

    /// Public page for one session.
    #[must_use]
    pub fn session_url(&self, session_id: &str) -> String {
        format!(
            "{}/resources/{}/session/{}/",
            self.website_url.trim_end_matches('/'),
            self.code_lower(),
            session_id.to_lowercase()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        assert!(!EventConfig::default().is_configured());
    }

    #[test]
    fn configured_when_all_fields_set() {
        let config = EventConfig {
            code: "SAN19".into(),
            sched_url: "https://example.sched.com".into(),
            sched_api_key: "key".into(),
            website_url: "https://summit.example.org/".into(),
        };
        assert!(config.is_configured());
        assert_eq!(config.code_lower(), "san19");
    }

    #[test]
    fn session_url_normalizes_trailing_slash_and_case() {
        let config = EventConfig {
            code: "SAN19".into(),
            website_url: "https://summit.example.org/".into(),
            ..Default::default()
        };
        assert_eq!(
            config.session_url("SAN19-210"),
            "https://summit.example.org/resources/san19/session/san19-210/"
        );
    }
}
