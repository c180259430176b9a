//! API credential resolution.
//!
//! The key is read once at startup. Resolution order:
//! 1. `GOOGLE_API_KEY` environment variable
//! 2. `GOOGLE_API_KEY` entry in `secrets.toml` inside the config directory

use std::path::{Path, PathBuf};

use skylens_common::ConfigError;
use tracing::debug;

pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";

const SECRETS_FILE: &str = "secrets.toml";

/// Resolve the API key from the environment, then from `secrets.toml`
/// in the platform config directory.
pub fn resolve_api_key() -> Result<String, ConfigError> {
    let path = secrets_path().ok();
    resolve_api_key_from(std::env::var(API_KEY_VAR).ok(), path.as_deref())
}

/// Resolution with explicit sources; empty values count as absent.
pub fn resolve_api_key_from(
    env_value: Option<String>,
    secrets_path: Option<&Path>,
) -> Result<String, ConfigError> {
    if let Some(key) = env_value.map(|v| v.trim().to_string()) {
        if !key.is_empty() {
            debug!("API key taken from {API_KEY_VAR}");
            return Ok(key);
        }
    }

    if let Some(path) = secrets_path {
        if let Some(key) = read_secrets_file(path)? {
            debug!("API key taken from {}", path.display());
            return Ok(key);
        }
    }

    Err(ConfigError::MissingSecret(format!(
        "{API_KEY_VAR} is not set. Export it or add it to {}",
        secrets_path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| SECRETS_FILE.to_string())
    )))
}

/// Default location of the secrets file.
pub fn secrets_path() -> Result<PathBuf, ConfigError> {
    Ok(crate::toml_loader::config_dir()?.join(SECRETS_FILE))
}

fn read_secrets_file(path: &Path) -> Result<Option<String>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;
    let table: toml::Table = toml::from_str(&content).map_err(|e| {
        ConfigError::ParseError(format!("failed to parse {}: {e}", path.display()))
    })?;

    Ok(table
        .get(API_KEY_VAR)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string))
}
