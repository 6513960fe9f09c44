//! Error types for lexi-ai

use thiserror::Error;

/// Result type alias using lexi-ai Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the generation backend
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error response
    #[error("API error: {message} (status: {status})")]
    Api { status: u16, message: String },

    /// Rate limit or quota exceeded
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Invalid API key
    #[error("Invalid or missing API key")]
    InvalidApiKey,

    /// The request did not complete in time
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// The prompt or the response was blocked by the backend's safety filters
    #[error("Response blocked: {0}")]
    Blocked(String),

    /// The backend answered but produced no text
    #[error("The model returned an empty response")]
    EmptyResponse,

    /// Unexpected response format
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl Error {
    /// Create an API error from an HTTP status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Map a failed HTTP status and its extracted message to an error
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Error::Auth(message),
            429 => Error::RateLimited(message),
            _ => Error::api(status, message),
        }
    }

    /// Check if retrying the same request later may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout() || e.is_connect(),
            Error::RateLimited(_) | Error::Timeout(_) | Error::EmptyResponse => true,
            Error::Api { status, message } => {
                let msg = message.to_lowercase();
                (500..=599).contains(status)
                    || msg.contains("overloaded")
                    || msg.contains("unavailable")
                    || msg.contains("try again")
            }
            _ => false,
        }
    }
}
