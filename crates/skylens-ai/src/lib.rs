//! AI engine for Skylens.
//!
//! Provides:
//! - Image decoding and upload validation
//! - A Gemini client for multimodal generation, with SSE streaming
//! - The conversation `Session`: image, turn history, sampling config
//! - Token usage tracking

pub mod gemini;
pub mod sampling;
pub mod session;
pub mod streaming;
pub mod token_tracker;
pub mod upload;

#[cfg(test)]
pub(crate) mod test_support;

use async_trait::async_trait;

pub use gemini::{GeminiClient, GeminiConfig};
pub use sampling::SamplingConfig;
pub use session::{Role, Session, SessionError, Turn};
pub use token_tracker::TokenTracker;
pub use upload::{decode_image, load_image_file, ImageError, ImageFormat, UploadedImage};

/// Callback receiving partial text while a response streams in.
pub type ChunkCallback = Box<dyn Fn(String) + Send + Sync>;

/// A stateless multimodal generation backend.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Model identifier, used for usage accounting and logs.
    fn model_name(&self) -> &str;

    async fn generate(
        &self,
        parts: &[PromptPart<'_>],
        sampling: &SamplingConfig,
    ) -> Result<ModelResponse, AiError>;

    async fn generate_streaming(
        &self,
        parts: &[PromptPart<'_>],
        sampling: &SamplingConfig,
        on_chunk: ChunkCallback,
    ) -> Result<ModelResponse, AiError>;
}

/// One element of the ordered prompt sent to the model.
#[derive(Debug, Clone, Copy)]
pub enum PromptPart<'a> {
    Text(&'a str),
    Image(&'a UploadedImage),
}

#[derive(Debug, Clone)]
pub struct ModelResponse {
    pub text: String,
    pub usage: TokenUsage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
}

impl From<reqwest::Error> for AiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AiError::Timeout
        } else {
            AiError::NetworkError(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_total_saturates() {
        let usage = TokenUsage {
            input_tokens: u64::MAX,
            output_tokens: 5,
        };
        assert_eq!(usage.total_tokens(), u64::MAX);
    }

    #[test]
    fn ai_error_display() {
        assert_eq!(AiError::RateLimited.to_string(), "Rate limited");
        assert_eq!(
            AiError::ApiError("HTTP 400: bad".into()).to_string(),
            "API error: HTTP 400: bad"
        );
        assert_eq!(AiError::Timeout.to_string(), "Timeout");
    }
}
