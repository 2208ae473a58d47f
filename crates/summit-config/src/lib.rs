//! # summit-config
//!
//! Layered configuration loading for Summit using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SUMMIT_*` prefix, `__` as separator)
//! 2. Secret-backend overrides (same key shape as env vars)
//! 3. Project-level `.summit/config.toml`
//! 4. User-level `~/.config/summit/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SUMMIT_EVENT__CODE` -> `event.code`,
//! `SUMMIT_GITHUB__TOKEN` -> `github.token`, etc. The `__` (double
//! underscore) separates nested config sections.

mod error;
mod event;
mod general;
mod github;
mod media;
mod storage;

pub use error::ConfigError;
pub use event::EventConfig;
pub use general::GeneralConfig;
pub use github::GitHubConfig;
pub use media::MediaConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const ENV_PREFIX: &str = "SUMMIT_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SummitConfig {
    #[serde(default)]
    pub event: EventConfig,
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl SummitConfig {
    /// Load configuration from all sources (TOML files + environment
    /// variables).
    ///
    /// Does NOT call `dotenvy` -- the CLI bootstrap loads `.env` before
    /// calling in here.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env_overrides(&[])
    }

    /// Load configuration with extra key/value overrides layered between the
    /// TOML files and the real environment.
    ///
    /// Override keys use the env-var shape (`SUMMIT_EVENT__CODE`); this is
    /// the contract with `summit-secrets`.
    pub fn load_with_env_overrides(
        overrides: &[(String, String)],
    ) -> Result<Self, ConfigError> {
        Self::figment(overrides)
            .extract()
            .map_err(ConfigError::from)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add additional
    /// providers on top.
    pub fn figment(overrides: &[(String, String)]) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".summit/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        if let Some(value) = overrides_to_value(overrides) {
            figment = figment.merge(Serialized::defaults(value));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("summit").join("config.toml"))
    }
}

/// Translate `SUMMIT_SECTION__FIELD` pairs into a nested JSON value figment
/// can merge. Keys without the prefix or a section separator are ignored.
fn overrides_to_value(overrides: &[(String, String)]) -> Option<serde_json::Value> {
    let mut root = serde_json::Map::new();

    for (key, value) in overrides {
        let Some(stripped) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        let Some((section, field)) = stripped.split_once("__") else {
            continue;
        };

        let section_map = root
            .entry(section.to_lowercase())
            .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
        if let Some(map) = section_map.as_object_mut() {
            map.insert(
                field.to_lowercase(),
                serde_json::Value::String(value.clone()),
            );
        }
    }

    if root.is_empty() {
        None
    } else {
        Some(serde_json::Value::Object(root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = SummitConfig::default();
        assert!(!config.event.is_configured());
        assert!(!config.github.is_configured());
        assert!(!config.storage.is_configured());
    }

    #[test]
    fn figment_builds_without_files() {
        let figment = SummitConfig::figment(&[]);
        let config: SummitConfig = figment.extract().expect("should extract defaults");
        assert!(!config.event.is_configured());
        assert_eq!(config.media.responsive_widths, vec![300, 800, 1200]);
    }

    #[test]
    fn overrides_map_into_sections() {
        let overrides = vec![
            ("SUMMIT_EVENT__CODE".to_string(), "SAN19".to_string()),
            ("SUMMIT_GITHUB__TOKEN".to_string(), "tok".to_string()),
            ("UNRELATED".to_string(), "x".to_string()),
            ("SUMMIT_NOSEP".to_string(), "x".to_string()),
        ];
        let value = overrides_to_value(&overrides).expect("some overrides mapped");
        assert_eq!(value["event"]["code"], "SAN19");
        assert_eq!(value["github"]["token"], "tok");
        assert!(value.get("nosep").is_none());
    }

    #[test]
    fn empty_overrides_map_to_none() {
        assert!(overrides_to_value(&[]).is_none());
    }
}
