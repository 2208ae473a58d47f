//! Shared HTTP response helpers for the scheduling client.
//!
//! Centralizes the status-code check (non-success -> [`SchedError::Api`]) so
//! the client modules stay focused on request construction and response
//! mapping.

use crate::error::SchedError;

/// Check an HTTP response for error conditions.
///
/// Returns the response unchanged on success; non-success status becomes
/// [`SchedError::Api`] with status code and response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, SchedError> {
    if !resp.status().is_success() {
        return Err(SchedError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}
