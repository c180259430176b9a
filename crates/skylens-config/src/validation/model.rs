use crate::schema::SkylensConfig;

use super::helpers::validate_range;

pub(crate) fn validate_model(errors: &mut Vec<String>, config: &SkylensConfig) {
    let model = &config.model;
    if model.name.trim().is_empty() {
        errors.push("model.name must not be empty".into());
    }
    validate_range(
        errors,
        "model.max_output_tokens",
        model.max_output_tokens.into(),
        1,
        8192,
    );
    validate_range(
        errors,
        "model.request_timeout_secs",
        model.request_timeout_secs.into(),
        5,
        600,
    );
    if !model.api_base.starts_with("https://") && !model.api_base.starts_with("http://") {
        errors.push(format!(
            "model.api_base = {:?} must be an http(s) URL",
            model.api_base
        ));
    }
}
