//! The REPL loop: reads lines, drives the session, writes results.

use std::io::Write;
use std::sync::{Arc, Mutex};

use skylens_ai::{ChunkCallback, GenerativeModel, Role, Session};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use super::command::{parse_command, Command, HELP};

/// Output sink shared with streaming callbacks.
pub type SharedOutput = Arc<Mutex<dyn Write + Send>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Repl<'a> {
    session: Session,
    model: &'a dyn GenerativeModel,
    out: SharedOutput,
    stream: bool,
    show_prompt: bool,
}

impl<'a> Repl<'a> {
    pub fn new(session: Session, model: &'a dyn GenerativeModel, out: SharedOutput) -> Self {
        Self {
            session,
            model,
            out,
            stream: false,
            show_prompt: false,
        }
    }

    pub fn with_streaming(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    pub fn with_prompt(mut self, show_prompt: bool) -> Self {
        self.show_prompt = show_prompt;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Process lines until EOF or `/quit`.
    pub async fn run<R>(&mut self, input: R) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        self.prompt()?;
        while let Some(line) = lines.next_line().await? {
            let flow = match parse_command(&line) {
                Ok(command) => self.execute(command).await?,
                Err(msg) => {
                    self.say(&format!("error: {msg}"))?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                break;
            }
            self.prompt()?;
        }
        debug!(session = self.session.id().short(), "session closed");
        Ok(())
    }

    /// Run one command. Session errors are reported, never propagated.
    pub async fn execute(&mut self, command: Command) -> std::io::Result<Flow> {
        match command {
            Command::Empty => {}
            Command::Ask(question) => self.ask(&question).await?,
            Command::Image(path) => match self.session.set_image_file(&path) {
                Ok(image) => {
                    let line = format!(
                        "loaded {} ({}x{}, {} KB); new conversation",
                        path.display(),
                        image.width(),
                        image.height(),
                        image.size_bytes().div_ceil(1024)
                    );
                    self.say(&line)?;
                }
                Err(e) => self.say(&format!("error: {e}"))?,
            },
            Command::Describe => match self.session.describe(self.model).await {
                Ok(text) => self.say(&text)?,
                Err(e) => self.say(&format!("error: {e}"))?,
            },
            Command::Temperature(t) => {
                match self.session.sampling().with_temperature(t) {
                    Ok(sampling) => {
                        self.session.set_sampling_config(sampling);
                        self.say(&format!("temperature = {t} for the next question"))?;
                    }
                    Err(e) => self.say(&format!("error: {e}"))?,
                }
            }
            Command::TopK(k) => match self.session.sampling().with_top_k(k) {
                Ok(sampling) => {
                    self.session.set_sampling_config(sampling);
                    self.say(&format!("top_k = {k} for the next question"))?;
                }
                Err(e) => self.say(&format!("error: {e}"))?,
            },
            Command::History => self.print_history()?,
            Command::Clear => {
                self.session.clear_history();
                self.say("conversation cleared")?;
            }
            Command::Usage => {
                let summary = self.session.tracker().summary();
                self.say(&summary)?;
            }
            Command::Help => self.say(HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn ask(&mut self, question: &str) -> std::io::Result<()> {
        if !self.stream {
            return match self.session.ask(self.model, question).await {
                Ok(answer) => self.say(&answer),
                Err(e) => self.say(&format!("error: {e}")),
            };
        }

        let out = Arc::clone(&self.out);
        let on_chunk: ChunkCallback = Box::new(move |chunk| {
            if let Ok(mut out) = out.lock() {
                let _ = write!(out, "{chunk}");
                let _ = out.flush();
            }
        });
        match self
            .session
            .ask_streaming(self.model, question, on_chunk)
            .await
        {
            Ok(_) => self.say(""),
            Err(e) => self.say(&format!("error: {e}")),
        }
    }

    fn print_history(&self) -> std::io::Result<()> {
        if self.session.history().is_empty() {
            return self.say("(no conversation yet)");
        }
        for turn in self.session.history() {
            let who = match turn.role() {
                Role::User => "you",
                Role::Assistant => "model",
            };
            self.say(&format!("[{who}] {}", turn.text()))?;
        }
        Ok(())
    }

    fn prompt(&self) -> std::io::Result<()> {
        if self.show_prompt {
            let mut out = self.lock()?;
            write!(out, "> ")?;
            out.flush()?;
        }
        Ok(())
    }

    fn say(&self, text: &str) -> std::io::Result<()> {
        writeln!(self.lock()?, "{text}")
    }

    fn lock(&self) -> std::io::Result<std::sync::MutexGuard<'_, dyn Write + Send + 'static>> {
        self.out
            .lock()
            .map_err(|_| std::io::Error::other("output lock poisoned"))
    }
}
