//! Configuration schema types for Skylens.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod logging;
mod model;
mod prompt;
mod sampling;
mod upload;

pub use logging::*;
pub use model::*;
pub use prompt::*;
pub use sampling::*;
pub use upload::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Skylens.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SkylensConfig {
    pub model: ModelConfig,
    pub sampling: SamplingSection,
    pub upload: UploadConfig,
    pub prompt: PromptConfig,
    pub logging: LoggingConfig,
}
