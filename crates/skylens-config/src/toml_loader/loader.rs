//! Core TOML config loading: read from path or platform default.

use crate::schema::SkylensConfig;
use crate::validation;
use skylens_common::ConfigError;
use std::path::Path;
use tracing::{debug, info, warn};

use super::paths::{create_default_config, default_config_path};

/// Load config from a specific TOML file path.
///
/// Missing fields take serde defaults. A config that parses but fails
/// validation is still returned; the warning names every bad field.
pub fn load_from_path(path: &Path) -> Result<SkylensConfig, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()))
        }
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "cannot read {}: {e}",
                path.display()
            )))
        }
    };

    let config: SkylensConfig = toml::from_str(&content).map_err(|e| {
        ConfigError::ParseError(format!("{} is not valid config TOML: {e}", path.display()))
    })?;

    if let Err(e) = validation::validate(&config) {
        warn!(path = %path.display(), "config has out-of-range values: {e}");
    }

    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// A first run writes the commented template there and uses defaults.
pub fn load_default() -> Result<SkylensConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!(path = %path.display(), "first run, writing config template");
            create_default_config(&path)?;
            Ok(SkylensConfig::default())
        }
        Err(e) => Err(e),
    }
}
