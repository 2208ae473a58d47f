//! Scheduling-service client.

use std::collections::BTreeMap;

use summit_core::Session;

use crate::error::SchedError;
use crate::http::check_response;
use crate::wire::{self, WireFile};

/// Client for one event's scheduling service.
#[derive(Debug, Clone)]
pub struct SchedClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    /// Attached-file lists from the last export, keyed by session id.
    files: BTreeMap<String, Vec<WireFile>>,
}

impl SchedClient {
    #[must_use]
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            files: BTreeMap::new(),
        }
    }

    /// Fetch the full session export, keyed by canonical session id.
    ///
    /// # Errors
    ///
    /// Returns [`SchedError`] if the HTTP request fails, the service returns
    /// a non-success status, or the response cannot be parsed.
    pub async fn fetch_sessions(&mut self) -> Result<BTreeMap<String, Session>, SchedError> {
        let url = format!(
            "{}/api/session/export?api_key={}&format=json",
            self.base_url,
            urlencoding::encode(&self.api_key)
        );

        let resp = check_response(self.http.get(&url).send().await?).await?;
        let records: Vec<wire::WireSession> = resp
            .json()
            .await
            .map_err(|e| SchedError::Parse(e.to_string()))?;

        let (sessions, files) = wire::map_export(records);
        tracing::info!(count = sessions.len(), "fetched session export");

        self.files = files;
        Ok(sessions)
    }

    /// Attached files for a session, as reported by the last export.
    #[must_use]
    pub fn session_files(&self, session_id: &str) -> &[WireFile] {
        self.files
            .get(&session_id.to_uppercase())
            .map_or(&[], Vec::as_slice)
    }

    /// All attached files from the last export.
    #[must_use]
    pub const fn all_files(&self) -> &BTreeMap<String, Vec<WireFile>> {
        &self.files
    }

    pub(crate) const fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = SchedClient::new("https://summit2019.sched.com/", "key");
        assert_eq!(client.base_url, "https://summit2019.sched.com");
    }

    #[test]
    fn session_files_empty_before_fetch() {
        let client = SchedClient::new("https://summit2019.sched.com", "key");
        assert!(client.session_files("SAN19-210").is_empty());
    }
}
