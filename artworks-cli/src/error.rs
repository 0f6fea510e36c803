//! CLI error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Artworks(#[from] artworks_lib::error::Error),
    #[error("readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
