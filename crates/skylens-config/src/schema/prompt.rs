//! Fixed prompt text sent ahead of every conversation.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a weather assistant. \
Answer questions about the uploaded image, focusing on weather conditions such as \
sky cover, clouds, precipitation, visibility and likely temperature. \
If the image shows no weather cues, describe what you can see. Be concise.";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub system_instruction: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.into(),
        }
    }
}
