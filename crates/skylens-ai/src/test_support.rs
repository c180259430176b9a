//! Shared fixtures for unit tests.

use std::io::Cursor;
use std::sync::Mutex;

use async_trait::async_trait;
use image::{DynamicImage, RgbImage};

use crate::upload::{decode_image, DEFAULT_MAX_UPLOAD_BYTES};
use crate::{
    AiError, ChunkCallback, GenerativeModel, ModelResponse, PromptPart, SamplingConfig,
    TokenUsage, UploadedImage,
};

/// Encoded PNG bytes with a simple gradient.
pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 200])
    }));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

/// Noisy JPEG: compresses poorly, so the byte size tracks the pixel count.
pub(crate) fn noisy_jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut state: u32 = 0x2545_f491;
    let img = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |_, _| {
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state & 0xff) as u8
        };
        image::Rgb([next(), next(), next()])
    }));
    let mut buf = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, 95);
    img.write_with_encoder(encoder).unwrap();
    buf
}

pub(crate) fn png_image() -> UploadedImage {
    decode_image(png_bytes(8, 8), DEFAULT_MAX_UPLOAD_BYTES).unwrap()
}

/// What a stub model saw on one call. Images are rendered as `<image:mime>`.
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub parts: Vec<String>,
    pub sampling: SamplingConfig,
}

/// Scripted `GenerativeModel` that records every request.
pub(crate) struct StubModel {
    replies: Mutex<Vec<Result<String, String>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubModel {
    /// Always answers `reply`.
    pub(crate) fn replying(reply: &str) -> Self {
        Self::scripted(vec![Ok(reply.to_string())])
    }

    /// Always fails with an API error carrying `message`.
    pub(crate) fn failing(message: &str) -> Self {
        Self::scripted(vec![Err(message.to_string())])
    }

    /// Answers in order; the last entry repeats.
    pub(crate) fn scripted(replies: Vec<Result<String, String>>) -> Self {
        Self {
            replies: Mutex::new(replies),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn respond(&self, parts: &[PromptPart<'_>], sampling: &SamplingConfig) -> Result<String, AiError> {
        let rendered = parts
            .iter()
            .map(|part| match part {
                PromptPart::Text(text) => text.to_string(),
                PromptPart::Image(image) => format!("<image:{}>", image.mime_type()),
            })
            .collect();
        self.calls.lock().unwrap().push(RecordedCall {
            parts: rendered,
            sampling: *sampling,
        });

        let mut replies = self.replies.lock().unwrap();
        let next = if replies.len() > 1 {
            replies.remove(0)
        } else {
            replies[0].clone()
        };
        next.map_err(AiError::ApiError)
    }
}

#[async_trait]
impl GenerativeModel for StubModel {
    fn model_name(&self) -> &str {
        "stub-model"
    }

    async fn generate(
        &self,
        parts: &[PromptPart<'_>],
        sampling: &SamplingConfig,
    ) -> Result<ModelResponse, AiError> {
        let text = self.respond(parts, sampling)?;
        Ok(ModelResponse {
            text,
            usage: TokenUsage {
                input_tokens: 10,
                output_tokens: 2,
            },
            finish_reason: Some("STOP".into()),
        })
    }

    async fn generate_streaming(
        &self,
        parts: &[PromptPart<'_>],
        sampling: &SamplingConfig,
        on_chunk: ChunkCallback,
    ) -> Result<ModelResponse, AiError> {
        let text = self.respond(parts, sampling)?;
        for word in text.split_inclusive(' ') {
            on_chunk(word.to_string());
        }
        Ok(ModelResponse {
            text,
            usage: TokenUsage {
                input_tokens: 10,
                output_tokens: 2,
            },
            finish_reason: Some("STOP".into()),
        })
    }
}
