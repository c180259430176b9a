//! Session struct, image handling and prompt assembly.

use std::path::Path;

use skylens_common::SessionId;
use tracing::{debug, info};

use crate::sampling::SamplingConfig;
use crate::token_tracker::TokenTracker;
use crate::upload::{decode_image, load_image_file, UploadedImage, DEFAULT_MAX_UPLOAD_BYTES};
use crate::PromptPart;

use super::types::{SessionError, Turn};

/// One user's interaction: the current image, its conversation, and the
/// sampling config for the next request.
pub struct Session {
    pub(super) id: SessionId,
    pub(super) image: Option<UploadedImage>,
    /// Conversation history, oldest first.
    pub(super) history: Vec<Turn>,
    pub(super) sampling: SamplingConfig,
    /// Fixed instruction sent ahead of every prompt.
    pub(super) system_instruction: String,
    pub(super) max_upload_bytes: u64,
    pub(super) tracker: TokenTracker,
}

impl Session {
    pub fn new(system_instruction: impl Into<String>) -> Self {
        let id = SessionId::new();
        debug!(session = id.short(), "session created");
        Self {
            id,
            image: None,
            history: Vec::new(),
            sampling: SamplingConfig::default(),
            system_instruction: system_instruction.into(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            tracker: TokenTracker::new(),
        }
    }

    pub fn with_max_upload_bytes(mut self, max: u64) -> Self {
        self.max_upload_bytes = max;
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }

    /// Validate and store a new image, starting a fresh conversation.
    ///
    /// On failure the previous image and history are left untouched.
    pub fn set_image(&mut self, bytes: Vec<u8>) -> Result<&UploadedImage, SessionError> {
        let image = decode_image(bytes, self.max_upload_bytes)?;
        Ok(self.store_image(image))
    }

    /// Like [`Session::set_image`], reading the bytes from `path`.
    pub fn set_image_file(&mut self, path: &Path) -> Result<&UploadedImage, SessionError> {
        let image = load_image_file(path, self.max_upload_bytes)?;
        Ok(self.store_image(image))
    }

    fn store_image(&mut self, image: UploadedImage) -> &UploadedImage {
        info!(
            session = self.id.short(),
            mime = image.mime_type(),
            width = image.width(),
            height = image.height(),
            dropped_turns = self.history.len(),
            "image loaded, history cleared"
        );
        self.history.clear();
        self.image.insert(image)
    }

    /// Applies to the next request only; earlier answers are unaffected.
    pub fn set_sampling_config(&mut self, sampling: SamplingConfig) {
        debug!(
            session = self.id.short(),
            temperature = sampling.temperature(),
            top_k = sampling.top_k(),
            "sampling updated"
        );
        self.sampling = sampling;
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn image(&self) -> Option<&UploadedImage> {
        self.image.as_ref()
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn sampling(&self) -> &SamplingConfig {
        &self.sampling
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    pub fn tracker(&self) -> &TokenTracker {
        &self.tracker
    }

    /// [system instruction] + [every turn, in order] + [image].
    pub(crate) fn prompt_parts<'a>(&'a self, image: &'a UploadedImage) -> Vec<PromptPart<'a>> {
        let mut parts = Vec::with_capacity(self.history.len() + 2);
        parts.push(PromptPart::Text(&self.system_instruction));
        parts.extend(self.history.iter().map(|turn| PromptPart::Text(turn.text())));
        parts.push(PromptPart::Image(image));
        parts
    }
}
