//! Gemini API client struct, request building, and response parsing.

use serde_json::{json, Value};

use crate::{AiError, ModelResponse, PromptPart, SamplingConfig, TokenUsage};

use super::config::GeminiConfig;

/// Gemini API client.
pub struct GeminiClient {
    pub(crate) config: GeminiConfig,
    pub(crate) http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AiError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    pub(crate) fn api_url(&self, stream: bool) -> String {
        let method = if stream {
            "streamGenerateContent?alt=sse"
        } else {
            "generateContent"
        };
        format!("{}/{}:{}", self.config.api_base, self.config.model, method)
    }

    /// Build the JSON request body for the Gemini API.
    ///
    /// All prompt parts go into a single `user` content, in order.
    pub(crate) fn build_request_body(
        &self,
        parts: &[PromptPart<'_>],
        sampling: &SamplingConfig,
    ) -> Value {
        let parts: Vec<Value> = parts
            .iter()
            .map(|part| match part {
                PromptPart::Text(text) => json!({ "text": text }),
                PromptPart::Image(image) => json!({
                    "inlineData": {
                        "mimeType": image.mime_type(),
                        "data": image.to_base64(),
                    }
                }),
            })
            .collect();

        json!({
            "contents": [{
                "role": "user",
                "parts": parts,
            }],
            "generationConfig": {
                "maxOutputTokens": self.config.max_output_tokens,
                "temperature": sampling.temperature(),
                "topK": sampling.top_k(),
            }
        })
    }

    /// Parse a complete (non-streamed) Gemini response.
    pub(crate) fn parse_response(&self, json: &Value) -> Result<ModelResponse, AiError> {
        check_blocked(json)?;

        let candidates = json["candidates"]
            .as_array()
            .ok_or_else(|| AiError::ParseError("no candidates in response".to_string()))?;
        let first = candidates
            .first()
            .ok_or_else(|| AiError::ParseError("empty candidates".to_string()))?;

        let text = candidate_text(first);
        let finish_reason = first["finishReason"].as_str().map(str::to_string);

        if text.is_empty() {
            return Err(no_text(finish_reason.as_deref()));
        }

        Ok(ModelResponse {
            text,
            usage: parse_usage(json).unwrap_or_default(),
            finish_reason,
        })
    }
}

/// Concatenate the text parts of one candidate.
pub(crate) fn candidate_text(candidate: &Value) -> String {
    candidate["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part["text"].as_str())
                .collect::<String>()
        })
        .unwrap_or_default()
}

/// Read `usageMetadata`, if present.
pub(crate) fn parse_usage(json: &Value) -> Option<TokenUsage> {
    let meta = json.get("usageMetadata")?;
    Some(TokenUsage {
        input_tokens: meta["promptTokenCount"].as_u64().unwrap_or(0),
        output_tokens: meta["candidatesTokenCount"].as_u64().unwrap_or(0),
    })
}

/// A prompt rejected by safety filters comes back as 200 with a block reason.
pub(crate) fn check_blocked(json: &Value) -> Result<(), AiError> {
    match json["promptFeedback"]["blockReason"].as_str() {
        Some(reason) => Err(AiError::ApiError(format!("prompt blocked: {reason}"))),
        None => Ok(()),
    }
}

fn no_text(finish_reason: Option<&str>) -> AiError {
    AiError::ApiError(format!(
        "model returned no text (finish reason: {})",
        finish_reason.unwrap_or("unknown")
    ))
}

/// Folds the events of a streamed generation into one response.
///
/// The first failure sticks; later events are ignored.
#[derive(Debug, Default)]
pub(crate) struct StreamAccumulator {
    text: String,
    usage: TokenUsage,
    finish_reason: Option<String>,
    failure: Option<AiError>,
}

impl StreamAccumulator {
    /// Apply one SSE `data` payload. Returns the new text, if any.
    pub(crate) fn push(&mut self, data: &str) -> Option<String> {
        if self.failure.is_some() {
            return None;
        }
        let json: Value = match serde_json::from_str(data) {
            Ok(json) => json,
            Err(e) => {
                self.failure = Some(AiError::ParseError(format!("bad stream event: {e}")));
                return None;
            }
        };
        if let Err(e) = check_blocked(&json) {
            self.failure = Some(e);
            return None;
        }

        // Each event carries the running totals.
        if let Some(latest) = parse_usage(&json) {
            self.usage = latest;
        }

        let candidate = json["candidates"].as_array().and_then(|c| c.first())?;
        if let Some(reason) = candidate["finishReason"].as_str() {
            self.finish_reason = Some(reason.to_string());
        }
        let chunk = candidate_text(candidate);
        if chunk.is_empty() {
            return None;
        }
        self.text.push_str(&chunk);
        Some(chunk)
    }

    pub(crate) fn finish(self) -> Result<ModelResponse, AiError> {
        if let Some(e) = self.failure {
            return Err(e);
        }
        if self.text.is_empty() {
            return Err(no_text(self.finish_reason.as_deref()));
        }
        Ok(ModelResponse {
            text: self.text,
            usage: self.usage,
            finish_reason: self.finish_reason,
        })
    }
}
