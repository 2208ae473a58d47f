//! Speaker photo downloads.

use std::path::{Path, PathBuf};

use summit_core::{Session, slugify};

use crate::error::MediaError;

/// Fetch the lead speaker's photo for a session's share card.
///
/// The scheduling service hands out pre-cropped `*.320x320px.jpg` URLs;
/// stripping the suffix yields the full-size original. Sessions without a
/// usable avatar (or without speakers at all) fall back to the placeholder
/// photo shipped with the assets, matching the `TBC` speaker text.
pub async fn fetch_speaker_photo(
    http: &reqwest::Client,
    session: &Session,
    photos_dir: &Path,
    assets_dir: &Path,
) -> Result<PathBuf, MediaError> {
    let placeholder = assets_dir.join("placeholder.jpg");

    let Some(speaker) = session.speakers.first() else {
        tracing::debug!(session_id = %session.session_id, "session has no speakers");
        return Ok(placeholder);
    };

    let avatar_url = speaker.avatar.replace(".320x320px.jpg", "");
    if avatar_url.len() < 3 {
        return Ok(placeholder);
    }

    std::fs::create_dir_all(photos_dir)?;
    let target = photos_dir.join(format!("{}.jpg", slugify(&speaker.name)));
    if target.is_file() {
        return Ok(target);
    }

    let resp = match http.get(&avatar_url).send().await.and_then(reqwest::Response::error_for_status) {
        Ok(resp) => resp,
        Err(error) => {
            tracing::warn!(
                session_id = %session.session_id,
                %error,
                "avatar download failed, using placeholder"
            );
            return Ok(placeholder);
        }
    };

    let bytes = resp.bytes().await?;
    std::fs::write(&target, &bytes)?;
    Ok(target)
}
