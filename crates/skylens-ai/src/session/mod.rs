//! Conversation session management.
//!
//! A `Session` holds the uploaded image, the ordered turn history and the
//! sampling config. Loading a new image starts a fresh conversation.

mod ask;
mod manager;
mod types;


pub use manager::Session;
pub use types::{Role, SessionError, Turn};
