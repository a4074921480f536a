//! Error types for the agenda crates.

use thiserror::Error;

/// Errors that can occur while fetching and normalizing external data.
#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Missing field: {0}")]
    MissingField(String),
}

/// Result type alias for agenda operations.
pub type AgendaResult<T> = Result<T, AgendaError>;
