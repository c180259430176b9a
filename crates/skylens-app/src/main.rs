mod bootstrap;
mod cli;
mod repl;

use std::io::{IsTerminal, Write};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use skylens_ai::{ChunkCallback, GenerativeModel, Session};
use skylens_common::{ConfigError, SkylensError};

use crate::cli::Args;
use crate::repl::{Command, Repl, SharedOutput};

fn main() -> ExitCode {
    // Before the runtime exists: set_var is only sound single-threaded.
    let dotenv = bootstrap::load_dotenv();

    let args = cli::parse();
    let (config, config_warnings) = bootstrap::load_config(&args);
    bootstrap::init_logging(args.log_level.as_deref(), config.logging.level);

    tracing::info!("Skylens v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }
    for warning in config_warnings {
        tracing::warn!("{warning}");
    }

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("skylens: {e}");
            match e {
                SkylensError::Config(ConfigError::MissingSecret(_)) => ExitCode::from(1),
                SkylensError::Session(_) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn run(args: &Args, config: &skylens_config::SkylensConfig) -> Result<(), SkylensError> {
    let api_key = skylens_config::resolve_api_key()?;
    let client = bootstrap::build_client(config, api_key)
        .map_err(|e| SkylensError::Other(e.to_string()))?;
    let session = bootstrap::build_session(config, args)
        .map_err(|e| SkylensError::Session(e.to_string()))?;
    tracing::info!(
        model = client.model_name(),
        session = session.id().short(),
        "session ready"
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    if args.question.is_some() || args.describe {
        runtime.block_on(one_shot(session, &client, args))
    } else {
        runtime.block_on(interactive(session, &client, args))
    }
}

/// Answer a single `--question` or `--describe` and print it to stdout.
async fn one_shot(
    mut session: Session,
    model: &dyn GenerativeModel,
    args: &Args,
) -> Result<(), SkylensError> {
    let session_err = |e: skylens_ai::SessionError| SkylensError::Session(e.to_string());

    if let Some(path) = &args.image {
        session.set_image_file(path).map_err(session_err)?;
    }

    let answer = match &args.question {
        Some(question) if args.stream => {
            let on_chunk: ChunkCallback = Box::new(|chunk| {
                let mut stdout = std::io::stdout();
                let _ = write!(stdout, "{chunk}");
                let _ = stdout.flush();
            });
            session
                .ask_streaming(model, question, on_chunk)
                .await
                .map_err(session_err)?;
            String::new()
        }
        Some(question) => session.ask(model, question).await.map_err(session_err)?,
        None => session.describe(model).await.map_err(session_err)?,
    };
    println!("{answer}");

    tracing::info!("Usage: {}", session.tracker().summary());
    Ok(())
}

/// Line-based REPL over stdin until EOF or `/quit`.
async fn interactive(
    session: Session,
    model: &dyn GenerativeModel,
    args: &Args,
) -> Result<(), SkylensError> {
    let out: SharedOutput = Arc::new(Mutex::new(std::io::stdout()));
    let interactive = std::io::stdin().is_terminal();
    let mut repl = Repl::new(session, model, out)
        .with_streaming(args.stream)
        .with_prompt(interactive);

    if interactive {
        println!("Type a question, or /help for commands.");
    }
    if let Some(path) = &args.image {
        repl.execute(Command::Image(path.clone())).await?;
    }

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    repl.run(stdin).await?;

    tracing::info!("Usage: {}", repl.session().tracker().summary());
    tracing::info!("Shutdown complete");
    Ok(())
}
