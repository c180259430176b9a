use std::path::PathBuf;

use clap::Parser;

/// Skylens: ask a hosted multimodal model about a weather photo.
#[derive(Parser, Debug)]
#[command(name = "skylens", version, about)]
pub struct Args {
    /// Image to load (JPEG or PNG).
    #[arg(short = 'i', long)]
    pub image: Option<PathBuf>,

    /// Ask one question about --image, print the answer and exit.
    #[arg(short = 'q', long, requires = "image")]
    pub question: Option<String>,

    /// Describe --image without a question and exit.
    #[arg(long, requires = "image", conflicts_with = "question")]
    pub describe: bool,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Sampling temperature override (0.0-2.0).
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Top-k override (1-50).
    #[arg(long)]
    pub top_k: Option<u32>,

    /// Stream answers as they are generated.
    #[arg(long)]
    pub stream: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_shot_flags() {
        let args = Args::try_parse_from([
            "skylens",
            "--image",
            "sky.jpg",
            "-q",
            "Is it sunny?",
            "--top-k",
            "10",
        ])
        .unwrap();
        assert_eq!(args.image, Some(PathBuf::from("sky.jpg")));
        assert_eq!(args.question.as_deref(), Some("Is it sunny?"));
        assert_eq!(args.top_k, Some(10));
        assert!(!args.describe);
    }

    #[test]
    fn question_requires_image() {
        assert!(Args::try_parse_from(["skylens", "-q", "hi"]).is_err());
    }

    #[test]
    fn describe_conflicts_with_question() {
        let result = Args::try_parse_from([
            "skylens",
            "-i",
            "a.png",
            "-q",
            "hi",
            "--describe",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn no_flags_is_repl() {
        let args = Args::try_parse_from(["skylens"]).unwrap();
        assert!(args.image.is_none());
        assert!(args.question.is_none());
        assert!(!args.stream);
    }
}
