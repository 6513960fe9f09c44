//! Google Generative AI (Gemini) API provider

use std::time::Duration;

use super::TextGenerator;
use crate::{
    error::{Error, Result},
    types::{Generation, GenerationOptions, Model, StopReason, Usage},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Timeout applied when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Google Generative AI client bound to a single model
pub struct GoogleProvider {
    client: reqwest::Client,
    api_key: String,
    model: Model,
    timeout: Duration,
}

impl GoogleProvider {
    /// Create a new Google provider with an explicit request timeout
    pub fn with_timeout(api_key: impl Into<String>, model: Model, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, api_key, model, timeout))
    }

    /// `timeout` must match the one `client` was built with
    fn with_client(
        client: reqwest::Client,
        api_key: impl Into<String>,
        model: Model,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model,
            timeout,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.model.base_url.trim_end_matches('/'),
            self.model.id
        )
    }

    fn build_request(&self, prompt: &str, options: &GenerationOptions) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: Some(GeminiGenerationConfig {
                max_output_tokens: options.max_tokens,
                temperature: options.temperature,
            }),
        }
    }
}

#[async_trait]
impl TextGenerator for GoogleProvider {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<Generation> {
        let request = self.build_request(prompt, options);
        tracing::debug!(
            model = %self.model.id,
            prompt_chars = prompt.chars().count(),
            "sending generateContent request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout(self.timeout.as_secs())
                } else {
                    Error::Http(e.without_url())
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout(self.timeout.as_secs())
            } else {
                Error::Http(e.without_url())
            }
        })?;

        if !status.is_success() {
            return Err(error_from_body(status.as_u16(), &body));
        }

        let parsed: GeminiResponse = serde_json::from_str(&body)?;
        let generation = parse_generation(parsed)?;
        tracing::debug!(
            input_tokens = generation.usage.input,
            output_tokens = generation.usage.output,
            stop_reason = ?generation.stop_reason,
            "generateContent completed"
        );
        Ok(generation)
    }
}

/// Turn a non-success response body into an error, preferring the API's own message
fn error_from_body(status: u16, body: &str) -> Error {
    match serde_json::from_str::<GeminiErrorResponse>(body) {
        Ok(error_response) => Error::from_status(status, error_response.error.message),
        Err(_) if body.trim().is_empty() => Error::from_status(status, format!("HTTP {status}")),
        Err(_) => Error::from_status(status, body.trim()),
    }
}

/// Extract the reply text from a successful response
fn parse_generation(response: GeminiResponse) -> Result<Generation> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_ref())
    {
        return Err(Error::Blocked(format!("prompt blocked ({reason})")));
    }

    let usage = response
        .usage_metadata
        .map(|u| Usage {
            input: u.prompt_token_count.unwrap_or(0),
            output: u.candidates_token_count.unwrap_or(0),
        })
        .unwrap_or_default();

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(Error::EmptyResponse)?;

    let finish_reason = candidate.finish_reason;
    let stop_reason = finish_reason.as_deref().map(StopReason::from_gemini);

    // Thought summaries are not part of the reply
    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter(|p| !p.thought)
                .filter_map(|p| p.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(match (stop_reason, finish_reason) {
            (Some(StopReason::Filtered), Some(reason)) => {
                Error::Blocked(format!("response stopped ({reason})"))
            }
            _ => Error::EmptyResponse,
        });
    }

    Ok(Generation {
        text,
        stop_reason,
        usage,
    })
}

// Request types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

// Response types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<GeminiPromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiError,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}
