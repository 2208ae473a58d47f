//! # summit-secrets
//!
//! External secret provider integrations for Summit, plus materialization of
//! file-shaped secrets (deploy keys) into the run's scratch directory.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use figment::Figment;
use figment::providers::Env;
use infisical::{AuthMethod, Client, secrets::ListSecretsRequest};
use serde::Deserialize;
use thiserror::Error;

const ENV_BACKEND: &str = "SUMMIT_SECRETS__BACKEND";
const ENV_INFISICAL_PREFIX: &str = "SUMMIT_INFISICAL__";

/// Result of resolving external secrets.
#[derive(Debug, Clone)]
pub enum SecretOverrides {
    Disabled,
    Values(Vec<(String, String)>),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
enum Backend {
    #[default]
    None,
    Infisical,
}

impl FromStr for Backend {
    type Err = SecretError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "off" | "disabled" => Ok(Self::None),
            "infisical" => Ok(Self::Infisical),
            other => Err(SecretError::UnsupportedBackend(other.to_string())),
        }
    }
}

fn selected_backend() -> Result<Backend, SecretError> {
    match std::env::var(ENV_BACKEND) {
        Ok(raw) => raw.parse(),
        Err(_) => Ok(Backend::default()),
    }
}

/// Connection settings, extracted from `SUMMIT_INFISICAL__*` variables the
/// same way the layered config reads its env sections.
#[derive(Debug, Clone, Deserialize)]
struct InfisicalSettings {
    #[serde(default = "InfisicalSettings::default_base_url")]
    base_url: String,
    client_id: String,
    client_secret: String,
    project_id: String,
    environment: String,
    #[serde(default = "InfisicalSettings::default_path")]
    path: String,
}

impl InfisicalSettings {
    fn from_env() -> Result<Self, SecretError> {
        let settings = Figment::new()
            .merge(Env::prefixed(ENV_INFISICAL_PREFIX))
            .extract()?;
        Ok(settings)
    }

    fn default_base_url() -> String {
        "https://app.infisical.com".to_string()
    }

    fn default_path() -> String {
        "/".to_string()
    }
}

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("unsupported secrets backend '{0}'")]
    UnsupportedBackend(String),
    #[error("incomplete secrets backend settings: {0}")]
    Settings(#[from] figment::Error),
    #[error("io error writing secret file: {0}")]
    Io(#[from] std::io::Error),
    #[error("infisical error: {0}")]
    Infisical(#[from] infisical::InfisicalError),
}

/// Load secret key/value overrides from the configured external backend.
///
/// Expected naming convention is exact config keys (e.g.,
/// `SUMMIT_GITHUB__TOKEN`).
pub async fn load_env_overrides() -> Result<SecretOverrides, SecretError> {
    match selected_backend()? {
        Backend::None => Ok(SecretOverrides::Disabled),
        Backend::Infisical => {
            let settings = InfisicalSettings::from_env()?;
            let values = load_from_infisical(&settings).await?;
            Ok(SecretOverrides::Values(values))
        }
    }
}

async fn load_from_infisical(
    settings: &InfisicalSettings,
) -> Result<Vec<(String, String)>, SecretError> {
    let mut client = Client::builder()
        .base_url(&settings.base_url)
        .build()
        .await?;

    client
        .login(AuthMethod::new_universal_auth(
            &settings.client_id,
            &settings.client_secret,
        ))
        .await?;

    let request = ListSecretsRequest::builder(&settings.project_id, &settings.environment)
        .path(&settings.path)
        .recursive(true)
        .expand_secret_references(true)
        .build();

    let mut values = client
        .secrets()
        .list(request)
        .await?
        .into_iter()
        .filter(|secret| secret.secret_key.starts_with("SUMMIT_"))
        .map(|secret| (secret.secret_key, secret.secret_value))
        .collect::<Vec<_>>();

    values.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(values)
}

/// Write a file-shaped secret (e.g. a deploy key) into the scratch directory.
///
/// Idempotent: an existing file is left untouched so repeated task runs
/// within one container reuse the same path. The file is made read-only for
/// the owner, which ssh requires for key material.
pub fn materialize(work_dir: &Path, file_name: &str, value: &str) -> Result<PathBuf, SecretError> {
    let path = work_dir.join(file_name);
    if path.is_file() {
        return Ok(path);
    }

    std::fs::create_dir_all(work_dir)?;
    std::fs::write(&path, value)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o400))?;
    }

    tracing::debug!(path = %path.display(), "materialized secret file");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::{Backend, InfisicalSettings, SecretError, materialize, selected_backend};

    #[test]
    fn backend_defaults_to_none_when_missing() {
        figment::Jail::expect_with(|_jail| {
            let backend = selected_backend().expect("backend should parse");
            assert_eq!(backend, Backend::None);
            Ok(())
        });
    }

    #[test]
    fn backend_parses_infisical() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SUMMIT_SECRETS__BACKEND", "infisical");
            let backend = selected_backend().expect("backend should parse");
            assert_eq!(backend, Backend::Infisical);
            Ok(())
        });
    }

    #[test]
    fn backend_rejects_unknown_value() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SUMMIT_SECRETS__BACKEND", "vault9000");
            assert!(selected_backend().is_err());
            Ok(())
        });
    }

    #[test]
    fn settings_extract_with_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SUMMIT_INFISICAL__CLIENT_ID", "machine");
            jail.set_env("SUMMIT_INFISICAL__CLIENT_SECRET", "s3cret");
            jail.set_env("SUMMIT_INFISICAL__PROJECT_ID", "proj");
            jail.set_env("SUMMIT_INFISICAL__ENVIRONMENT", "prod");

            let settings = InfisicalSettings::from_env().expect("settings should extract");
            assert_eq!(settings.base_url, "https://app.infisical.com");
            assert_eq!(settings.path, "/");
            assert_eq!(settings.environment, "prod");
            Ok(())
        });
    }

    #[test]
    fn incomplete_settings_are_an_error() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SUMMIT_INFISICAL__CLIENT_ID", "machine");

            let error = InfisicalSettings::from_env().expect_err("client secret is missing");
            assert!(matches!(error, SecretError::Settings(_)));
            Ok(())
        });
    }

    #[test]
    fn materialize_writes_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = materialize(dir.path(), "deploy.pem", "KEY MATERIAL").expect("write");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "KEY MATERIAL");

        // Second call must not touch the existing (read-only) file.
        let again = materialize(dir.path(), "deploy.pem", "DIFFERENT").expect("reuse");
        assert_eq!(again, path);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "KEY MATERIAL");
    }

    #[cfg(unix)]
    #[test]
    fn materialized_file_is_owner_read_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let path = materialize(dir.path(), "deploy.pem", "KEY").expect("write");
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o400);
    }
}
