pub mod defaults;
pub mod errors;
pub mod id;

pub use errors::{ConfigError, SkylensError};
pub use id::{new_id, SessionId};

pub type Result<T> = std::result::Result<T, SkylensError>;
