//! Full configuration validation.
//!
//! Each section has its own validator; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod helpers;
mod model;
mod sampling;
mod upload;


use crate::schema::SkylensConfig;
use skylens_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &SkylensConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    model::validate_model(&mut errors, config);
    sampling::validate_sampling(&mut errors, config);
    upload::validate_upload(&mut errors, config);

    if config.prompt.system_instruction.trim().is_empty() {
        errors.push("prompt.system_instruction must not be empty".into());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

/// Reset every section that fails validation to its defaults, keeping
/// the valid sections as loaded. Returns one note per reset section.
pub fn reset_invalid_sections(config: &mut SkylensConfig) -> Vec<String> {
    let mut notes = Vec::new();

    let mut errors = Vec::new();
    model::validate_model(&mut errors, config);
    if !errors.is_empty() {
        config.model = Default::default();
        notes.push(reset_note("model", &errors));
    }

    let mut errors = Vec::new();
    sampling::validate_sampling(&mut errors, config);
    if !errors.is_empty() {
        config.sampling = Default::default();
        notes.push(reset_note("sampling", &errors));
    }

    let mut errors = Vec::new();
    upload::validate_upload(&mut errors, config);
    if !errors.is_empty() {
        config.upload = Default::default();
        notes.push(reset_note("upload", &errors));
    }

    if config.prompt.system_instruction.trim().is_empty() {
        config.prompt = Default::default();
        notes.push(reset_note(
            "prompt",
            &["prompt.system_instruction must not be empty".to_string()],
        ));
    }

    notes
}

fn reset_note(section: &str, errors: &[String]) -> String {
    format!("[{section}] reset to defaults: {}", errors.join("; "))
}
