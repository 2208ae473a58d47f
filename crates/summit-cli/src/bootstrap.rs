//! Configuration bootstrap for one container run.
//!
//! Order matters: `.env` first, before the tracing subscriber reads
//! `SUMMIT_LOG` and before the secret backend is selected from the
//! environment, then the backend itself, then the layered config with the
//! resolved overrides. In CI a broken secret backend is fatal; locally it
//! degrades to the on-disk config with a warning.

use std::path::Path;

use anyhow::Context;

use summit_config::SummitConfig;

use crate::cli::Cli;

/// Load `.env` into the process environment. Runs before tracing init, so
/// failures are silent like a missing file.
pub fn load_dotenv() {
    load_dotenv_from(Path::new("."));
}

fn load_dotenv_from(dir: &Path) {
    let file = dir.join(".env");
    if file.is_file() {
        dotenvy::from_path(&file).ok();
    }
}

pub async fn load_config(cli: &Cli) -> anyhow::Result<SummitConfig> {
    let env_overrides = match summit_secrets::load_env_overrides().await {
        Ok(summit_secrets::SecretOverrides::Disabled) => Vec::new(),
        Ok(summit_secrets::SecretOverrides::Values(values)) => values,
        Err(error) => {
            if is_ci() {
                return Err(anyhow::anyhow!(
                    "failed to load configured secret backend in CI: {error}"
                ));
            }

            tracing::warn!(%error, "failed to load external secrets; continuing with local config");
            Vec::new()
        }
    };

    let mut config = SummitConfig::load_with_env_overrides(&env_overrides)
        .context("failed to load summit configuration")?;

    if let Some(work_dir) = &cli.work_dir {
        config.general.work_dir = work_dir.clone();
    }
    if let Some(session_id) = &cli.session_id {
        config.general.session_id = session_id.clone();
    }

    warn_unconfigured(&config);
    Ok(config)
}

fn is_ci() -> bool {
    std::env::var("CI")
        .map(|value| value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn warn_unconfigured(config: &SummitConfig) {
    if !config.event.is_configured() {
        tracing::warn!(
            "event is not configured (event.code, event.sched_url, event.sched_api_key)"
        );
    }
    if !config.github.is_configured() {
        tracing::warn!("github is not configured; the PR workflow will fail");
    }
    if !config.storage.is_configured() {
        tracing::warn!("storage is not configured; uploads will fail unless --no-upload is set");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotenv_values_reach_the_environment() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "SUMMIT_BOOTSTRAP_DOTENV=loaded\n").unwrap();

        load_dotenv_from(dir.path());

        assert_eq!(
            std::env::var("SUMMIT_BOOTSTRAP_DOTENV").as_deref(),
            Ok("loaded")
        );
    }

    #[test]
    fn missing_dotenv_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        load_dotenv_from(dir.path());
    }

    #[test]
    fn ci_detection_is_case_insensitive() {
        // Only exercised when the variable is absent in the test
        // environment; the figment Jail tests cover the set case.
        if std::env::var("CI").is_err() {
            assert!(!is_ci());
        }
    }
}
