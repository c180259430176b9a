//! Sampling validation (temperature, top_k).

use crate::schema::SkylensConfig;

use super::helpers::{validate_range, validate_range_f64};

pub(crate) fn validate_sampling(errors: &mut Vec<String>, config: &SkylensConfig) {
    validate_range_f64(
        errors,
        "sampling.temperature",
        config.sampling.temperature,
        0.0,
        2.0,
    );
    validate_range(errors, "sampling.top_k", config.sampling.top_k.into(), 1, 50);
}
