//! Interactive line-based front end over one `Session`.

mod command;
mod runner;


pub use command::Command;
pub use runner::{Flow, Repl, SharedOutput};
