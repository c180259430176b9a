//! Skylens configuration system.
//!
//! TOML-based configuration with validation and API credential
//! resolution. All config sections use defaults so partial configs
//! work out of the box.
//!
//! ```rust,no_run
//! use skylens_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod secrets;
pub mod toml_loader;
pub mod validation;

pub use schema::{SkylensConfig, CONFIG_SCHEMA_VERSION};
pub use secrets::resolve_api_key;

use skylens_common::ConfigError;
use std::path::Path;

/// Load config from `path`, or from the platform default path when `None`.
///
/// The default file is created on first use. The result is validated.
pub fn load_config(path: Option<&Path>) -> Result<SkylensConfig, ConfigError> {
    let config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };

    validation::validate(&config)?;
    Ok(config)
}

/// Load config like [`load_config`], but keep what is valid.
///
/// Sections that fail validation are replaced by their defaults and
/// reported as notes. Missing or unparsable files are still errors.
pub fn load_config_lenient(
    path: Option<&Path>,
) -> Result<(SkylensConfig, Vec<String>), ConfigError> {
    let mut config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };
    let notes = validation::reset_invalid_sections(&mut config);
    Ok((config, notes))
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &SkylensConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
