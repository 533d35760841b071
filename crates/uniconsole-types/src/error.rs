//! Error types for UniConsole.

use std::io;

/// Errors produced by the command registry, dispatcher and configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("command registry has not been built")]
    NotInitialized,

    #[error("invalid command name: {0}")]
    InvalidCommandName(String),

    #[error("invalid command signature: {0}")]
    InvalidSignature(String),

    #[error("unsupported shape: {0}")]
    UnsupportedShape(String),

    #[error("argument error: {0}")]
    Argument(String),

    #[error("command error: {0}")]
    Command(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ConsoleError>;
