//! Core types for generation requests

use serde::{Deserialize, Serialize};

/// Model definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Model identifier (e.g., "gemini-2.5-pro")
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Base URL for API calls
    pub base_url: String,
    /// Context window size in tokens
    pub context_window: u32,
    /// Maximum output tokens
    pub max_tokens: u32,
}

/// Token usage reported by the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input: u32,
    pub output: u32,
}

/// Reason why generation stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of response
    Stop,
    /// Maximum tokens reached
    Length,
    /// Stopped by a safety or recitation filter
    Filtered,
    /// Anything else the backend reported
    Other,
}

impl StopReason {
    /// Parse a Gemini `finishReason` value
    pub fn from_gemini(reason: &str) -> Self {
        match reason {
            "STOP" => StopReason::Stop,
            "MAX_TOKENS" => StopReason::Length,
            "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" | "SPII" => {
                StopReason::Filtered
            }
            _ => StopReason::Other,
        }
    }
}

/// Options for a single generation request
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Temperature (0.0 - 2.0)
    pub temperature: Option<f32>,
}

/// The result of a completed generation
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    /// Raw response text, untrimmed
    pub text: String,
    /// Why the backend stopped
    pub stop_reason: Option<StopReason>,
    /// Token usage, when reported
    pub usage: Usage,
}

impl Generation {
    /// Create a generation holding only text
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            stop_reason: Some(StopReason::Stop),
            usage: Usage::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_reason_from_gemini() {
        assert_eq!(StopReason::from_gemini("STOP"), StopReason::Stop);
        assert_eq!(StopReason::from_gemini("MAX_TOKENS"), StopReason::Length);
        assert_eq!(StopReason::from_gemini("SAFETY"), StopReason::Filtered);
        assert_eq!(StopReason::from_gemini("RECITATION"), StopReason::Filtered);
        assert_eq!(StopReason::from_gemini("FINISH_REASON_UNSPECIFIED"), StopReason::Other);
    }
}
