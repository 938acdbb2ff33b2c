//! Error types for the show runner.

use thiserror::Error;

/// Result type for show operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or starting a show.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Panel table rejected
    #[error("Panel error: {0}")]
    Panel(#[from] mosaic_panel::Error),

    /// Automaton could not be built
    #[error("Automaton error: {0}")]
    Automaton(#[from] mosaic_automata::Error),

    /// Invalid configuration value
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
