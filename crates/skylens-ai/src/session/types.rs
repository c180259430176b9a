//! Session value types and errors.

use serde::{Deserialize, Serialize};

use crate::upload::ImageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in the conversation. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    text: String,
}

impl Turn {
    pub(crate) fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub(crate) fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("invalid image: {0}")]
    InvalidImage(String),
    #[error("file too large: {size} bytes exceeds the {max} byte limit")]
    FileTooLarge { size: u64, max: u64 },
    #[error("no image loaded; upload an image first")]
    NoImage,
    #[error("question is empty")]
    EmptyQuestion,
    #[error("model error: {0}")]
    ModelError(String),
    #[error("invalid sampling config: {0}")]
    InvalidSampling(String),
}

impl From<ImageError> for SessionError {
    fn from(e: ImageError) -> Self {
        match e {
            ImageError::InvalidImage(msg) => SessionError::InvalidImage(msg),
            ImageError::FileTooLarge { size, max } => SessionError::FileTooLarge { size, max },
        }
    }
}
