//! Image upload limits.

use serde::{Deserialize, Serialize};

pub use skylens_common::defaults::DEFAULT_MAX_UPLOAD_BYTES;

/// Upper bound accepted by validation (50 MiB).
pub const MAX_UPLOAD_LIMIT_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Largest accepted image file in bytes.
    pub max_bytes: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
