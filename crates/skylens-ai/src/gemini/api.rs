//! GenerativeModel trait implementation for GeminiClient (generate + streaming).

use async_trait::async_trait;
use tracing::debug;

use crate::streaming::{parse_sse_stream, SseEvent};
use crate::{AiError, ChunkCallback, GenerativeModel, ModelResponse, PromptPart, SamplingConfig};

use super::client::{GeminiClient, StreamAccumulator};

impl GeminiClient {
    async fn post(
        &self,
        parts: &[PromptPart<'_>],
        sampling: &SamplingConfig,
        stream: bool,
    ) -> Result<reqwest::Response, AiError> {
        let body = self.build_request_body(parts, sampling);
        let url = self.api_url(stream);

        debug!(
            model = %self.config.model,
            parts = parts.len(),
            temperature = sampling.temperature(),
            top_k = sampling.top_k(),
            stream,
            "Gemini API request"
        );

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::ApiError(format!("HTTP {status}: {text}")));
        }

        Ok(response)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn generate(
        &self,
        parts: &[PromptPart<'_>],
        sampling: &SamplingConfig,
    ) -> Result<ModelResponse, AiError> {
        let response = self.post(parts, sampling, false).await?;

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        self.parse_response(&json)
    }

    async fn generate_streaming(
        &self,
        parts: &[PromptPart<'_>],
        sampling: &SamplingConfig,
        on_chunk: ChunkCallback,
    ) -> Result<ModelResponse, AiError> {
        let response = self.post(parts, sampling, true).await?;

        let mut stream = StreamAccumulator::default();
        parse_sse_stream(response, |event: SseEvent| {
            if let Some(chunk) = stream.push(&event.data) {
                on_chunk(chunk);
            }
        })
        .await?;

        stream.finish()
    }
}
