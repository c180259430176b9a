//! Commented default config written on first run.

/// Generate the default TOML config content with comments.
pub(super) fn default_config_toml() -> &'static str {
    r##"# Skylens Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
# The API key is NOT read from this file. Set GOOGLE_API_KEY in the
# environment or put it in secrets.toml next to this file.

[model]
# name = "gemini-1.5-flash"
# max_output_tokens = 2048      # 1-8192
# request_timeout_secs = 120    # 5-600
# api_base = "https://generativelanguage.googleapis.com/v1beta/models"

[sampling]
# temperature = 0.7             # 0.0-2.0
# top_k = 40                    # 1-50

[upload]
# max_bytes = 5242880           # 1-52428800

[prompt]
# system_instruction = "You are a weather assistant. ..."

[logging]
# level = "info"                # trace, debug, info, warn, error
"##
}
