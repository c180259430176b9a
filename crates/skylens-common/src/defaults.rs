//! Defaults shared by the config schema and the AI client.

/// Hosted model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Generative Language API endpoint for model calls.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Upload bound: 5 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;
