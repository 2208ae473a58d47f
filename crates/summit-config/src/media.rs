//! Social-card and video publishing configuration.

use serde::{Deserialize, Serialize};

/// Default widths for resized share-image variants.
fn default_widths() -> Vec<u32> {
    vec![300, 800, 1200]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaConfig {
    /// Template image the social cards are composited onto. When empty, the
    /// per-event template `<assets_dir>/templates/<code>-placeholder.jpg`
    /// is used.
    #[serde(default)]
    pub template: String,

    /// Directory holding fonts, templates and the placeholder photo.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,

    /// Widths (px) for resized JPEG variants of each share image.
    #[serde(default = "default_widths")]
    pub responsive_widths: Vec<u32>,

    /// External command handed the video payload for publishing.
    /// The payload file path is appended as the final argument.
    #[serde(default)]
    pub uploader_command: Vec<String>,
}

fn default_assets_dir() -> String {
    String::from("assets")
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            template: String::new(),
            assets_dir: default_assets_dir(),
            responsive_widths: default_widths(),
            uploader_command: Vec::new(),
        }
    }
}

impl MediaConfig {
    /// Resolve the template image path for an event.
    #[must_use]
    pub fn template_for(&self, event_code: &str) -> String {
        if self.template.is_empty() {
            format!(
                "{}/templates/{}-placeholder.jpg",
                self.assets_dir,
                event_code.to_lowercase()
            )
        } else {
            self.template.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = MediaConfig::default();
        assert_eq!(config.responsive_widths, vec![300, 800, 1200]);
        assert_eq!(config.assets_dir, "assets");
        assert!(config.uploader_command.is_empty());
    }

    #[test]
    fn template_derived_from_event_code_when_unset() {
        let config = MediaConfig::default();
        assert_eq!(
            config.template_for("SAN19"),
            "assets/templates/san19-placeholder.jpg"
        );
    }

    #[test]
    fn explicit_template_wins() {
        let config = MediaConfig {
            template: "custom.jpg".into(),
            ..Default::default()
        };
        assert_eq!(config.template_for("SAN19"), "custom.jpg");
    }
}
