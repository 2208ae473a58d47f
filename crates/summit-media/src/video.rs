//! Video publishing support for `--upload-video`.
//!
//! The actual upload is delegated to an external uploader command; this
//! module downloads the recording from the CDN, builds the human-readable
//! description from session data, and hands the uploader a JSON payload.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use serde::Serialize;
use summit_core::Session;
use summit_storage::CommandRunner;
use tokio::io::AsyncWriteExt;

use crate::error::MediaError;

/// Payload handed to the configured uploader command.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VideoMeta {
    pub file: PathBuf,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category: String,
    pub privacy_status: String,
    pub thumbnail: PathBuf,
}

impl VideoMeta {
    /// Assemble the payload for one session.
    #[must_use]
    pub fn for_session(
        session: &Session,
        video_path: &Path,
        thumbnail: &Path,
        session_url: &str,
        event_code: &str,
    ) -> Self {
        Self {
            file: video_path.to_path_buf(),
            title: session.title.clone(),
            description: build_description(session, session_url),
            tags: vec![
                event_code.to_lowercase(),
                "Open Source".to_string(),
                session.track.clone(),
            ],
            category: String::from("28"),
            privacy_status: String::from("private"),
            thumbnail: thumbnail.to_path_buf(),
        }
    }
}

/// Build the video description: abstract, speaker lines, session page link.
#[must_use]
pub fn build_description(session: &Session, session_url: &str) -> String {
    let abstract_text = session
        .description
        .replace("<br>", "\n")
        .replace("<br/>", "\n");

    let mut speaker_lines = String::new();
    for speaker in &session.speakers {
        let role_line = speaker.role_line();
        if role_line.is_empty() {
            speaker_lines.push_str(&format!("{}\n{}\n", speaker.name, speaker.about));
        } else {
            speaker_lines.push_str(&format!(
                "{} - {}\n{}\n",
                speaker.name, role_line, speaker.about
            ));
        }
    }

    format!(
        "Session Abstract\n\n{abstract_text}\n\nSpeakers\n\n{speaker_lines}\n\
         Visit the website for the session presentations and more:\n\n{session_url}\n"
    )
}

/// Download a session recording from the CDN into `videos_dir`.
///
/// Streams to disk; recordings are far too large to buffer. An existing
/// file is reused.
pub async fn download_video(
    http: &reqwest::Client,
    cdn_url: &str,
    event_code: &str,
    session_id: &str,
    videos_dir: &Path,
) -> Result<PathBuf, MediaError> {
    std::fs::create_dir_all(videos_dir)?;
    let target = videos_dir.join(format!("{}.mp4", session_id.to_lowercase()));
    if target.is_file() {
        tracing::info!(path = %target.display(), "video already downloaded");
        return Ok(target);
    }

    let url = format!(
        "{}/events/{}/videos/{}.mp4",
        cdn_url.trim_end_matches('/'),
        event_code.to_lowercase(),
        session_id.to_lowercase()
    );
    tracing::info!(%url, "downloading session video");

    let resp = http.get(&url).send().await?.error_for_status()?;
    let mut stream = resp.bytes_stream();
    let mut file = tokio::fs::File::create(&target).await?;
    while let Some(chunk) = stream.next().await {
        file.write_all(&chunk?).await?;
    }
    file.flush().await?;

    Ok(target)
}

/// Hand the payload to the configured uploader command.
///
/// The payload is written as JSON next to the video and its path is appended
/// as the command's final argument.
pub async fn publish_video(
    runner: &CommandRunner,
    uploader_command: &[String],
    meta: &VideoMeta,
) -> Result<(), MediaError> {
    let (program, base_args) = uploader_command
        .split_first()
        .ok_or(MediaError::NoUploader)?;

    let payload_path = meta.file.with_extension("upload.json");
    std::fs::write(&payload_path, serde_json::to_vec_pretty(meta)?)?;

    let mut args: Vec<String> = base_args.to_vec();
    args.push(payload_path.display().to_string());

    tracing::info!(program, title = %meta.title, "handing video to uploader");
    runner.run(program, &args).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use summit_core::{SessionSlot, Speaker, session::sched_datetime};

    use super::*;

    fn session() -> Session {
        Session {
            session_id: "SAN19-210".to_string(),
            title: "Kernel testing at scale".to_string(),
            description: "First line.<br>Second line.<br/>Third.".to_string(),
            track: "Testing".to_string(),
            slot: SessionSlot {
                start_time: sched_datetime::parse("2019-09-23 14:00:00").unwrap(),
                end_time: sched_datetime::parse("2019-09-23 14:25:00").unwrap(),
            },
            room: String::new(),
            speakers: vec![
                Speaker {
                    name: "Grace Hopper".to_string(),
                    role: "speaker".to_string(),
                    company: "Acme".to_string(),
                    position: "Engineer".to_string(),
                    avatar: String::new(),
                    about: "Compiler pioneer.".to_string(),
                },
                Speaker {
                    name: "Ada Lovelace".to_string(),
                    role: "speaker".to_string(),
                    company: String::new(),
                    position: String::new(),
                    avatar: String::new(),
                    about: "First programmer.".to_string(),
                },
            ],
        }
    }

    #[test]
    fn description_contains_abstract_speakers_and_link() {
        let description = build_description(&session(), "https://example.org/s/san19-210/");
        assert!(description.contains("First line.\nSecond line.\nThird."));
        assert!(description.contains("Grace Hopper - Engineer at Acme"));
        // No role line for Ada: name then bio directly.
        assert!(description.contains("Ada Lovelace\nFirst programmer."));
        assert!(description.contains("https://example.org/s/san19-210/"));
    }

    #[test]
    fn meta_defaults_to_private_upload() {
        let meta = VideoMeta::for_session(
            &session(),
            Path::new("videos/san19-210.mp4"),
            Path::new("images/SAN19-210.png"),
            "https://example.org/s/san19-210/",
            "SAN19",
        );
        assert_eq!(meta.privacy_status, "private");
        assert_eq!(meta.tags[0], "san19");
        assert_eq!(meta.thumbnail, Path::new("images/SAN19-210.png"));
    }

    #[tokio::test]
    async fn publish_without_uploader_is_an_error() {
        let runner = CommandRunner::new();
        let meta = VideoMeta::for_session(
            &session(),
            Path::new("/tmp/none.mp4"),
            Path::new("/tmp/none.png"),
            "https://example.org/",
            "SAN19",
        );
        let err = publish_video(&runner, &[], &meta).await.unwrap_err();
        assert!(matches!(err, MediaError::NoUploader));
    }

    #[tokio::test]
    async fn publish_writes_payload_and_appends_path() {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("san19-210.mp4");
        std::fs::write(&video, b"mp4").unwrap();

        let meta = VideoMeta::for_session(
            &session(),
            &video,
            Path::new("thumb.png"),
            "https://example.org/",
            "SAN19",
        );
        let uploader = vec!["true".to_string()];
        publish_video(&CommandRunner::new(), &uploader, &meta)
            .await
            .unwrap();

        let payload_path = video.with_extension("upload.json");
        let payload: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(payload_path).unwrap()).unwrap();
        assert_eq!(payload["title"], "Kernel testing at scale");
        assert_eq!(payload["privacy_status"], "private");
    }
}
