//! Async question answering for Session (ask, streaming, describe).

use tracing::{info, warn};

use crate::{AiError, ChunkCallback, GenerativeModel, ModelResponse, PromptPart};

use super::manager::Session;
use super::types::{SessionError, Turn};

impl Session {
    /// Ask a question about the current image.
    ///
    /// On success history grows by the user turn and the assistant turn.
    /// If the model call fails only the user turn remains.
    pub async fn ask(
        &mut self,
        model: &dyn GenerativeModel,
        question: &str,
    ) -> Result<String, SessionError> {
        self.push_question(question)?;

        let result = {
            let image = self.image.as_ref().ok_or(SessionError::NoImage)?;
            let parts = self.prompt_parts(image);
            model.generate(&parts, &self.sampling).await
        };

        self.record_answer(model.model_name(), result)
    }

    /// Same contract as [`Session::ask`], streaming partial text to `on_chunk`.
    pub async fn ask_streaming(
        &mut self,
        model: &dyn GenerativeModel,
        question: &str,
        on_chunk: ChunkCallback,
    ) -> Result<String, SessionError> {
        self.push_question(question)?;

        let result = {
            let image = self.image.as_ref().ok_or(SessionError::NoImage)?;
            let parts = self.prompt_parts(image);
            model
                .generate_streaming(&parts, &self.sampling, on_chunk)
                .await
        };

        self.record_answer(model.model_name(), result)
    }

    /// Describe the current image without a question. History is not touched.
    pub async fn describe(&mut self, model: &dyn GenerativeModel) -> Result<String, SessionError> {
        let result = {
            let image = self.image.as_ref().ok_or(SessionError::NoImage)?;
            let parts = [
                PromptPart::Text(&self.system_instruction),
                PromptPart::Image(image),
            ];
            model.generate(&parts, &self.sampling).await
        };

        match result {
            Ok(response) => {
                self.tracker.record(model.model_name(), &response.usage);
                Ok(response.text)
            }
            Err(e) => Err(self.model_failure(e)),
        }
    }

    /// Check preconditions, then append the trimmed question as a user turn.
    fn push_question(&mut self, question: &str) -> Result<(), SessionError> {
        if self.image.is_none() {
            return Err(SessionError::NoImage);
        }
        let question = question.trim();
        if question.is_empty() {
            return Err(SessionError::EmptyQuestion);
        }
        self.history.push(Turn::user(question));
        Ok(())
    }

    fn record_answer(
        &mut self,
        model_name: &str,
        result: Result<ModelResponse, AiError>,
    ) -> Result<String, SessionError> {
        match result {
            Ok(response) => {
                self.tracker.record(model_name, &response.usage);
                self.history.push(Turn::assistant(response.text.clone()));
                info!(
                    session = self.id.short(),
                    turns = self.history.len(),
                    tokens = response.usage.total_tokens(),
                    "answer received"
                );
                Ok(response.text)
            }
            Err(e) => Err(self.model_failure(e)),
        }
    }

    fn model_failure(&self, e: AiError) -> SessionError {
        warn!(session = self.id.short(), error = %e, "model call failed");
        SessionError::ModelError(e.to_string())
    }
}
