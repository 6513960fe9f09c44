//! Error types for lexi-agent

use thiserror::Error;

/// Result type alias using lexi-agent Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to the front end
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid credential/configuration. Fatal to the session.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A draft request failed. The session can continue and retry.
    #[error("Generation failed: {0}")]
    Generation(#[from] lexi_ai::Error),
}

impl Error {
    /// Whether the session may keep going after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Generation(_))
    }

    /// Whether retrying the same request later may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Generation(e) => e.is_retryable(),
            Error::Configuration(_) => false,
        }
    }
}
