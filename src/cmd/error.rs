//! User-facing dispatch failures. Anything else (transport, parse, file I/O)
//! travels as a plain `anyhow::Error` with context.

use std::path::PathBuf;
use thiserror::Error;

use super::command::Command;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid arguments: unknown command '{0}'")]
    UnknownCommand(String),

    #[error("Invalid arguments: {0} requires an argument")]
    MissingArgument(Command),

    #[error("Empty {} file. No command found to execute", .0.display())]
    EmptyFile(PathBuf),

    #[error("Tried calling do-what-it-says infinitely")]
    SelfInvocation,

    #[error("No tracks found for '{0}'")]
    NoTracks(String),
}

impl CommandError {
    /// Whether the usage text should follow the message.
    pub fn shows_usage(&self) -> bool {
        matches!(
            self,
            CommandError::UnknownCommand(_)
                | CommandError::MissingArgument(_)
                | CommandError::EmptyFile(_)
        )
    }
}
