//! Parsing of REPL input lines.

use std::path::PathBuf;

pub const HELP: &str = "\
Commands:
  /image PATH     load a JPEG or PNG (starts a new conversation)
  /describe       describe the current image
  /temp T         set temperature for the next question (0.0-2.0)
  /topk K         set top-k for the next question (1-50)
  /history        show the conversation so far
  /clear          forget the conversation, keep the image
  /usage          show token usage
  /help           show this help
  /quit           exit
Anything else is asked as a question about the current image.";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Ask(String),
    Image(PathBuf),
    Describe,
    Temperature(f64),
    TopK(u32),
    History,
    Clear,
    Usage,
    Help,
    Quit,
    Empty,
}

/// Parse one input line. Errors are user-facing messages.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Empty);
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Command::Ask(line.to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "image" | "img" => {
            let path = unquote(arg);
            if path.is_empty() {
                return Err("usage: /image PATH".into());
            }
            Ok(Command::Image(PathBuf::from(path)))
        }
        "describe" => Ok(Command::Describe),
        "temp" | "temperature" => arg
            .parse()
            .map(Command::Temperature)
            .map_err(|_| format!("usage: /temp T (got {arg:?})")),
        "topk" | "top_k" => arg
            .parse()
            .map(Command::TopK)
            .map_err(|_| format!("usage: /topk K (got {arg:?})")),
        "history" => Ok(Command::History),
        "clear" => Ok(Command::Clear),
        "usage" => Ok(Command::Usage),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("unknown command /{other}; try /help")),
    }
}

fn unquote(arg: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = arg
            .strip_prefix(quote)
            .and_then(|s| s.strip_suffix(quote))
        {
            return inner;
        }
    }
    arg
}
