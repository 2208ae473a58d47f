//! Front-matter header of a session post.
//!
//! Field names follow the website's templates; changing them breaks the
//! static-site build, so they are spelled out rather than derived.

use serde::{Deserialize, Serialize};
use summit_core::{Session, SessionSlot};

use crate::error::SiteError;
use crate::escape::escape_html;

/// Structured metadata header of one session post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: String,
    pub session_id: String,
    pub session_speakers: Vec<SpeakerEntry>,
    pub description: String,
    /// Site-relative path of the session's share image.
    pub image: String,
    pub session_room: String,
    pub session_slot: SessionSlot,
    pub tags: String,
    pub categories: Vec<String>,
    pub session_track: String,
    pub tag: String,
}

/// One speaker as the website templates expect it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpeakerEntry {
    pub speaker_name: String,
    pub speaker_position: String,
    pub speaker_company: String,
    pub speaker_image: String,
    pub speaker_bio: String,
    pub speaker_role: String,
}

impl FrontMatter {
    /// Build the header for a session. Speaker-provided strings are HTML
    /// escaped on the way in.
    #[must_use]
    pub fn from_session(session: &Session, event_code: &str) -> Self {
        let code_lower = event_code.to_lowercase();
        let session_id = session.canonical_id();

        let session_speakers = session
            .speakers
            .iter()
            .map(|speaker| SpeakerEntry {
                speaker_name: escape_html(&speaker.name),
                speaker_position: escape_html(&speaker.position),
                speaker_company: escape_html(&speaker.company),
                speaker_image: escape_html(&speaker.avatar),
                speaker_bio: escape_html(&speaker.about),
                speaker_role: escape_html(&speaker.role),
            })
            .collect();

        Self {
            title: session.title.clone(),
            session_id: session_id.clone(),
            session_speakers,
            description: session.description.clone(),
            image: format!("/assets/images/featured-images/{code_lower}/{session_id}.png"),
            session_room: session.room.clone(),
            session_slot: session.slot.clone(),
            tags: session.track.clone(),
            categories: vec![code_lower],
            session_track: session.track.clone(),
            tag: String::from("session"),
        }
    }

    /// Render the full post: fenced YAML header plus (empty) body.
    pub fn render(&self, body: &str) -> Result<String, SiteError> {
        let yaml = serde_yaml::to_string(self)?;
        Ok(format!("---\n{yaml}---\n{body}"))
    }

    /// Parse the header out of a post file's content.
    pub fn parse(content: &str, path: &std::path::Path) -> Result<Self, SiteError> {
        let rest = content
            .strip_prefix("---")
            .ok_or_else(|| SiteError::MalformedPost(path.to_path_buf()))?;
        let end = rest
            .find("\n---")
            .ok_or_else(|| SiteError::MalformedPost(path.to_path_buf()))?;
        Ok(serde_yaml::from_str(&rest[..end])?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use summit_core::{Speaker, session::sched_datetime};

    use super::*;

    fn session() -> Session {
        Session {
            session_id: "SAN19-210".to_string(),
            title: "Kernel testing at scale".to_string(),
            description: "How we test.".to_string(),
            track: "Keynote".to_string(),
            slot: SessionSlot {
                start_time: sched_datetime::parse("2019-09-23 14:00:00").unwrap(),
                end_time: sched_datetime::parse("2019-09-23 14:25:00").unwrap(),
            },
            room: "Pacific Room".to_string(),
            speakers: vec![Speaker {
                name: "Grace <Hopper>".to_string(),
                role: "speaker".to_string(),
                company: "Acme & Co".to_string(),
                position: "Engineer".to_string(),
                avatar: "https://cdn.example.org/grace.jpg".to_string(),
                about: "Compiler pioneer.".to_string(),
            }],
        }
    }

    #[test]
    fn builds_header_with_escaped_speakers() {
        let fm = FrontMatter::from_session(&session(), "SAN19");
        assert_eq!(fm.session_id, "SAN19-210");
        assert_eq!(fm.session_speakers[0].speaker_name, "Grace &lt;Hopper&gt;");
        assert_eq!(fm.session_speakers[0].speaker_company, "Acme &amp; Co");
        assert_eq!(
            fm.image,
            "/assets/images/featured-images/san19/SAN19-210.png"
        );
        assert_eq!(fm.categories, vec!["san19"]);
        assert_eq!(fm.tag, "session");
    }

    #[test]
    fn render_parse_round_trip_is_structural_identity() {
        let fm = FrontMatter::from_session(&session(), "SAN19");
        let rendered = fm.render("").unwrap();
        assert!(rendered.starts_with("---\n"));

        let parsed = FrontMatter::parse(&rendered, std::path::Path::new("x.md")).unwrap();
        assert_eq!(parsed, fm);
    }

    #[test]
    fn parse_rejects_posts_without_fences() {
        let err = FrontMatter::parse("just a body", std::path::Path::new("bad.md")).unwrap_err();
        assert!(matches!(err, SiteError::MalformedPost(_)));
    }
}
