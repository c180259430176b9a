//! Generative model connection settings.

use serde::{Deserialize, Serialize};

pub use skylens_common::defaults::{DEFAULT_API_BASE, DEFAULT_MODEL};

/// Which hosted model to call and how.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model identifier, e.g. `gemini-1.5-flash`.
    pub name: String,
    /// Upper bound on generated tokens (valid range: 1-8192).
    pub max_output_tokens: u32,
    /// Whole-request timeout in seconds (valid range: 5-600).
    pub request_timeout_secs: u32,
    pub api_base: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL.into(),
            max_output_tokens: 2048,
            request_timeout_secs: 120,
            api_base: DEFAULT_API_BASE.into(),
        }
    }
}
