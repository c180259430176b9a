//! Startup wiring: .env loading, logging, config, client and session.

use std::path::PathBuf;
use std::time::Duration;

use skylens_ai::{GeminiClient, GeminiConfig, SamplingConfig, Session, SessionError};
use skylens_config::schema::LogLevel;
use skylens_config::SkylensConfig;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

/// Load environment variables from a .env file (KEY=VALUE lines).
///
/// Existing variables win. Returns the file that was applied, if any.
/// Must run before any other thread exists.
pub fn load_dotenv() -> Option<PathBuf> {
    let mut candidates = vec![PathBuf::from(".env")];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("skylens").join(".env"));
    }

    for path in candidates {
        if let Ok(contents) = std::fs::read_to_string(&path) {
            for (key, value) in parse_dotenv(&contents) {
                if std::env::var(&key).is_err() {
                    std::env::set_var(key, value);
                }
            }
            return Some(path);
        }
    }
    None
}

pub(crate) fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            let value = value.trim().trim_matches('"').trim_matches('\'');
            Some((key.trim().to_string(), value.to_string()))
        })
        .collect()
}

/// Initialize the global subscriber. Logs go to stderr so answers on
/// stdout stay clean.
pub fn init_logging(cli_level: Option<&str>, config_level: LogLevel) {
    let level = cli_level.unwrap_or(config_level.as_str());
    let directive = format!("skylens={level}");
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| "skylens=info".parse().expect("static directive")),
            ),
        )
        .init();
}

/// Load the config. Sections with out-of-range values fall back to their
/// defaults; an unreadable file falls back entirely.
///
/// Runs before logging is up, so the warnings are handed back for the
/// caller to log.
pub fn load_config(args: &Args) -> (SkylensConfig, Vec<String>) {
    match skylens_config::load_config_lenient(args.config.as_deref()) {
        Ok((config, notes)) => (config, notes),
        Err(e) => (
            SkylensConfig::default(),
            vec![format!("config load failed, using defaults: {e}")],
        ),
    }
}

pub fn build_client(config: &SkylensConfig, api_key: String) -> Result<GeminiClient, skylens_ai::AiError> {
    let gemini = GeminiConfig::new(api_key)
        .with_model(config.model.name.clone())
        .with_max_output_tokens(config.model.max_output_tokens)
        .with_api_base(config.model.api_base.clone())
        .with_request_timeout(Duration::from_secs(config.model.request_timeout_secs.into()));
    GeminiClient::new(gemini)
}

/// A fresh session from config, with CLI sampling overrides applied.
pub fn build_session(config: &SkylensConfig, args: &Args) -> Result<Session, SessionError> {
    let sampling = SamplingConfig::new(
        args.temperature.unwrap_or(config.sampling.temperature),
        args.top_k.unwrap_or(config.sampling.top_k),
    )?;
    Ok(Session::new(config.prompt.system_instruction.clone())
        .with_max_upload_bytes(config.upload.max_bytes)
        .with_sampling(sampling))
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn parse_dotenv_handles_quotes_comments_and_export() {
        let vars = parse_dotenv(
            "# comment\n\nGOOGLE_API_KEY=\"abc\"\nexport OTHER='x y'\nBROKEN\n",
        );
        assert_eq!(
            vars,
            vec![
                ("GOOGLE_API_KEY".to_string(), "abc".to_string()),
                ("OTHER".to_string(), "x y".to_string()),
            ]
        );
    }

    #[test]
    fn session_uses_config_values() {
        let mut config = SkylensConfig::default();
        config.upload.max_bytes = 1234;
        config.sampling.top_k = 3;
        let args = Args::parse_from(["skylens"]);

        let session = build_session(&config, &args).unwrap();
        assert_eq!(session.max_upload_bytes(), 1234);
        assert_eq!(session.sampling().top_k(), 3);
        assert_eq!(
            session.system_instruction(),
            config.prompt.system_instruction
        );
    }

    #[test]
    fn cli_sampling_overrides_config() {
        let config = SkylensConfig::default();
        let args = Args::parse_from(["skylens", "--temperature", "1.5", "--top-k", "8"]);

        let session = build_session(&config, &args).unwrap();
        assert!((session.sampling().temperature() - 1.5).abs() < f64::EPSILON);
        assert_eq!(session.sampling().top_k(), 8);
    }

    #[test]
    fn out_of_range_override_is_rejected() {
        let config = SkylensConfig::default();
        let args = Args::parse_from(["skylens", "--top-k", "99"]);
        assert!(matches!(
            build_session(&config, &args),
            Err(SessionError::InvalidSampling(_))
        ));
    }

    #[test]
    fn bad_sampling_in_file_keeps_other_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[model]\nname = \"gemini-2.0-flash\"\n\n[sampling]\ntop_k = 99\n",
        )
        .unwrap();
        let args = Args::parse_from(["skylens", "--config", path.to_str().unwrap()]);

        let (config, warnings) = load_config(&args);
        assert_eq!(config.model.name, "gemini-2.0-flash");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("sampling.top_k"));
        assert!(build_session(&config, &args).is_ok());
    }

    #[test]
    fn unreadable_config_falls_back_to_defaults() {
        let args = Args::parse_from(["skylens", "--config", "/nonexistent/skylens.toml"]);
        let (config, warnings) = load_config(&args);
        assert_eq!(config.model.name, SkylensConfig::default().model.name);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("using defaults"));
    }

    #[test]
    fn config_defaults_match_client_and_session_defaults() {
        let config = SkylensConfig::default();
        let client = build_client(&config, "k".into()).unwrap();
        let plain = GeminiConfig::new("k");
        assert_eq!(client.config().model, plain.model);
        assert_eq!(client.config().api_base, plain.api_base);
        assert_eq!(client.config().max_output_tokens, plain.max_output_tokens);

        let session = build_session(&config, &Args::parse_from(["skylens"])).unwrap();
        assert_eq!(
            session.max_upload_bytes(),
            Session::new("system").max_upload_bytes()
        );
    }

    #[test]
    fn client_uses_config_model() {
        let mut config = SkylensConfig::default();
        config.model.name = "gemini-2.0-flash".into();
        let client = build_client(&config, "k".into()).unwrap();
        assert_eq!(client.config().model, "gemini-2.0-flash");
        assert_eq!(client.config().request_timeout, Duration::from_secs(120));
    }
}
