use serde::{Deserialize, Serialize};

/// Initial sampling parameters for a new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingSection {
    /// Valid range: 0.0-2.0.
    pub temperature: f64,
    /// Valid range: 1-50.
    pub top_k: u32,
}

impl Default for SamplingSection {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
        }
    }
}
