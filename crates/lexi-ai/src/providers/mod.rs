//! Text-generation backends

pub mod google;

use crate::{Error, Generation, GenerationOptions, Result};
use async_trait::async_trait;

/// Environment variables checked for the Gemini API key, in order
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// A backend that turns one prompt into one block of text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send a prompt and wait for the complete response
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<Generation>;
}

/// Get an API key from a provided value or, failing that, from the first of
/// [`API_KEY_ENV_VARS`] that `lookup` resolves.
///
/// Blank values are treated as missing.
pub fn lookup_api_key(
    provided: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String> {
    if let Some(key) = provided.map(str::trim).filter(|k| !k.is_empty()) {
        return Ok(key.to_string());
    }

    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
        .ok_or(Error::InvalidApiKey)
}
