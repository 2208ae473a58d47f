//! Social-share card layout and ImageMagick invocation.
//!
//! The card is the event template with the lead speaker's photo masked to a
//! circle in the top-right corner and four text blocks: speaker names,
//! session id, track and wrapped title. Rendering itself is ImageMagick's
//! job; this module only assembles the argv.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use summit_core::Session;
use summit_storage::CommandRunner;

use crate::error::MediaError;
use crate::photos::fetch_speaker_photo;

const AVATAR_SIZE: u32 = 300;
const AVATAR_X: i32 = 820;
const AVATAR_Y: i32 = 80;
const WRAP_WIDTH: usize = 28;

/// One positioned text overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub value: String,
    pub x: i32,
    pub y: i32,
    pub pointsize: u32,
    /// Font file relative to the assets dir.
    pub font: String,
    /// Wrap to this many characters per line before annotating.
    pub wrap_width: Option<usize>,
}

/// Everything ImageMagick needs to composite one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLayout {
    pub template: PathBuf,
    pub avatar: PathBuf,
    pub texts: Vec<TextBlock>,
    pub output: PathBuf,
}

impl CardLayout {
    /// Standard layout for a session card.
    #[must_use]
    pub fn for_session(
        session: &Session,
        template: &Path,
        avatar: &Path,
        assets_dir: &Path,
        output_dir: &Path,
    ) -> Self {
        let speakers = if session.speakers.is_empty() {
            String::from("TBC")
        } else {
            session
                .speakers
                .iter()
                .map(|s| s.name.clone())
                .collect::<Vec<_>>()
                .join(", ")
        };

        let regular = assets_dir.join("fonts/Lato-Regular.ttf");
        let bold = assets_dir.join("fonts/Lato-Bold.ttf");

        Self {
            template: template.to_path_buf(),
            avatar: avatar.to_path_buf(),
            texts: vec![
                TextBlock {
                    value: speakers,
                    x: 920,
                    y: 400,
                    pointsize: 32,
                    font: regular.display().to_string(),
                    wrap_width: Some(WRAP_WIDTH),
                },
                TextBlock {
                    value: session.canonical_id(),
                    x: 80,
                    y: 140,
                    pointsize: 48,
                    font: bold.display().to_string(),
                    wrap_width: None,
                },
                TextBlock {
                    value: session.track.clone(),
                    x: 80,
                    y: 200,
                    pointsize: 28,
                    font: bold.display().to_string(),
                    wrap_width: None,
                },
                TextBlock {
                    value: session.title.clone(),
                    x: 80,
                    y: 240,
                    pointsize: 48,
                    font: bold.display().to_string(),
                    wrap_width: Some(WRAP_WIDTH),
                },
            ],
            output: output_dir.join(format!("{}.png", session.canonical_id())),
        }
    }
}

/// Assemble the full `magick` argv for one card.
#[must_use]
pub fn magick_args(layout: &CardLayout) -> Vec<String> {
    let size = format!("{AVATAR_SIZE}x{AVATAR_SIZE}");
    let half = AVATAR_SIZE / 2;

    let mut args = vec![
        layout.template.display().to_string(),
        // Circle-masked avatar, composited top-right.
        "(".into(),
        layout.avatar.display().to_string(),
        "-resize".into(),
        format!("{size}^"),
        "-gravity".into(),
        "center".into(),
        "-extent".into(),
        size.clone(),
        "(".into(),
        "-size".into(),
        size,
        "xc:none".into(),
        "-fill".into(),
        "white".into(),
        "-draw".into(),
        format!("circle {half},{half} {half},0"),
        ")".into(),
        "-compose".into(),
        "CopyOpacity".into(),
        "-composite".into(),
        ")".into(),
        "-gravity".into(),
        "NorthWest".into(),
        "-geometry".into(),
        format!("+{AVATAR_X}+{AVATAR_Y}"),
        "-compose".into(),
        "Over".into(),
        "-composite".into(),
    ];

    for text in &layout.texts {
        let value = text
            .wrap_width
            .map_or_else(|| text.value.clone(), |width| wrap_text(&text.value, width));
        args.extend([
            "-font".into(),
            text.font.clone(),
            "-pointsize".into(),
            text.pointsize.to_string(),
            "-fill".into(),
            "white".into(),
            "-annotate".into(),
            format!("+{}+{}", text.x, text.y),
            value,
        ]);
    }

    args.push(layout.output.display().to_string());
    args
}

/// Greedy word wrap at `width` characters.
#[must_use]
pub fn wrap_text(input: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in input.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

/// Generate one card per session.
///
/// Avatar downloads that fail fall back to the placeholder inside
/// [`fetch_speaker_photo`]; a failing `magick` invocation aborts the pass
/// with the tool's exit code.
pub async fn generate_cards(
    runner: &CommandRunner,
    http: &reqwest::Client,
    sessions: &BTreeMap<String, Session>,
    template: &Path,
    assets_dir: &Path,
    images_dir: &Path,
) -> Result<usize, MediaError> {
    std::fs::create_dir_all(images_dir)?;
    let photos_dir = images_dir.join("photos");

    let mut generated = 0;
    for session in sessions.values() {
        let avatar = fetch_speaker_photo(http, session, &photos_dir, assets_dir).await?;
        let layout = CardLayout::for_session(session, template, &avatar, assets_dir, images_dir);

        tracing::debug!(session_id = %session.session_id, "compositing share card");
        runner.run("magick", magick_args(&layout)).await?;
        generated += 1;
    }

    tracing::info!(generated, "share cards generated");
    Ok(generated)
}
