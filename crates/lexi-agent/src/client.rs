//! Reply generation client: one prompt in, one trimmed draft out.

use std::sync::Arc;
use std::time::Duration;

use lexi_ai::models::{self, DEFAULT_MODEL_ID};
use lexi_ai::providers::{API_KEY_ENV_VARS, google::GoogleProvider, lookup_api_key};
use lexi_ai::{GenerationOptions, Model, TextGenerator};

use crate::error::{Error, Result};
use crate::prompt;

/// Settings needed to reach the backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Model to draft with
    pub model: Model,
    /// Key from the config file; the environment is used when absent
    pub api_key: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Sampling temperature
    pub temperature: Option<f32>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            model: models::resolve_model(DEFAULT_MODEL_ID),
            api_key: None,
            timeout: lexi_ai::providers::google::DEFAULT_TIMEOUT,
            temperature: None,
        }
    }
}

/// Drafts and revises replies through a [`TextGenerator`]
pub struct ReplyClient {
    generator: Arc<dyn TextGenerator>,
    options: GenerationOptions,
}

impl ReplyClient {
    /// Read the API key from the environment and set up the Gemini backend.
    ///
    /// Fails with [`Error::Configuration`] when no key is available, before
    /// any request is made. Calling it again simply builds a new client.
    pub fn configure(config: &ClientConfig) -> Result<Self> {
        Self::configure_with(config, |name| std::env::var(name).ok())
    }

    /// Same as [`ReplyClient::configure`] with an injectable variable lookup
    pub fn configure_with(
        config: &ClientConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let api_key = lookup_api_key(config.api_key.as_deref(), lookup).map_err(|_| {
            Error::Configuration(format!(
                "API key not found. Set {} in the environment or a .env file.",
                API_KEY_ENV_VARS.join(" or ")
            ))
        })?;

        let provider = GoogleProvider::with_timeout(api_key, config.model.clone(), config.timeout)
            .map_err(|e| Error::Configuration(format!("failed to set up HTTP client: {e}")))?;

        tracing::info!(
            model = %config.model.id,
            timeout_secs = config.timeout.as_secs(),
            "reply client configured"
        );

        Ok(Self {
            generator: Arc::new(provider),
            options: GenerationOptions {
                max_tokens: None,
                temperature: config.temperature,
            },
        })
    }

    /// Use an arbitrary backend
    pub fn with_generator(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            options: GenerationOptions::default(),
        }
    }

    /// Set generation options
    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Draft a reply to `source_text` following `style_instructions`.
    ///
    /// Inputs are passed through as given. The response is trimmed of
    /// surrounding whitespace and otherwise returned unchanged.
    pub async fn draft(&self, style_instructions: &str, source_text: &str) -> Result<String> {
        let prompt = prompt::build_prompt(style_instructions, source_text);
        let generation = self
            .generator
            .generate(&prompt, &self.options)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "draft request failed"))?;

        let reply = generation.text.trim();
        if reply.is_empty() {
            return Err(Error::Generation(lexi_ai::Error::EmptyResponse));
        }
        Ok(reply.to_string())
    }

    /// Revise `previous_reply` according to `change_request`.
    ///
    /// This is [`ReplyClient::draft`] with the change request as the style
    /// instructions and the previous reply as the text to work on.
    pub async fn revise(&self, change_request: &str, previous_reply: &str) -> Result<String> {
        self.draft(
            &prompt::revision_instructions(change_request),
            &prompt::revision_source(previous_reply),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockGenerator;

    fn client(mock: &Arc<MockGenerator>) -> ReplyClient {
        ReplyClient::with_generator(mock.clone())
    }

    #[test]
    fn test_configure_without_key() {
        let result = ReplyClient::configure_with(&ClientConfig::default(), |_| None);
        match result {
            Err(Error::Configuration(msg)) => assert!(msg.contains("GEMINI_API_KEY")),
            _ => panic!("expected a configuration error"),
        }
    }

    #[test]
    fn test_configure_with_env_key() {
        let result = ReplyClient::configure_with(&ClientConfig::default(), |name| {
            (name == "GEMINI_API_KEY").then(|| "test-key".to_string())
        });
        assert!(result.is_ok());
    }

    #[test]
    fn test_configure_with_config_key() {
        let config = ClientConfig {
            api_key: Some("from-file".into()),
            ..Default::default()
        };
        assert!(ReplyClient::configure_with(&config, |_| None).is_ok());
    }

    #[test]
    fn test_configure_twice() {
        let config = ClientConfig {
            api_key: Some("k".into()),
            ..Default::default()
        };
        assert!(ReplyClient::configure_with(&config, |_| None).is_ok());
        assert!(ReplyClient::configure_with(&config, |_| None).is_ok());
    }

    #[tokio::test]
    async fn test_draft_returns_trimmed_text() {
        let mock = Arc::new(MockGenerator::with_replies([
            "\n\n  Hi Alex,\n\nFriday works for me.\n\nBest,\nJo  \n",
        ]));
        let reply = client(&mock)
            .draft("Formal and brief", "Can we move our meeting to Friday?")
            .await
            .unwrap();

        assert!(!reply.is_empty());
        assert_eq!(reply, reply.trim());
        assert_eq!(reply, "Hi Alex,\n\nFriday works for me.\n\nBest,\nJo");

        let prompts = mock.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Formal and brief"));
        assert!(prompts[0].contains("Can we move our meeting to Friday?"));
    }

    #[tokio::test]
    async fn test_draft_backend_failure() {
        let mock = Arc::new(MockGenerator::new());
        mock.push_error(lexi_ai::Error::UnexpectedResponse("connection reset".into()));

        let result = client(&mock).draft("Formal", "Hello").await;
        assert!(matches!(
            result,
            Err(Error::Generation(lexi_ai::Error::UnexpectedResponse(_)))
        ));
    }

    #[tokio::test]
    async fn test_draft_whitespace_response_is_an_error() {
        let mock = Arc::new(MockGenerator::with_replies([" \n\t "]));
        let result = client(&mock).draft("Formal", "Hello").await;
        assert!(matches!(
            result,
            Err(Error::Generation(lexi_ai::Error::EmptyResponse))
        ));
    }

    #[tokio::test]
    async fn test_draft_passes_options() {
        let mock = Arc::new(MockGenerator::with_replies(["ok"]));
        let client = client(&mock).with_options(GenerationOptions {
            max_tokens: Some(512),
            temperature: Some(0.3),
        });
        client.draft("a", "b").await.unwrap();
        assert_eq!(mock.last_options().and_then(|o| o.max_tokens), Some(512));
    }

    #[tokio::test]
    async fn test_revise_embeds_previous_reply() {
        let mock = Arc::new(MockGenerator::with_replies([
            "Dear Sam,\nFriday at 10 works.",
            "Hi Sam!\nFriday at 10 works great, thanks!",
        ]));
        let client = client(&mock);

        let first = client
            .draft("Formal and brief", "Can we move our meeting to Friday?")
            .await
            .unwrap();
        let revised = client.revise("make it warmer", &first).await.unwrap();

        assert_eq!(revised, "Hi Sam!\nFriday at 10 works great, thanks!");
        let prompts = mock.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[1].contains(&first));
        assert!(prompts[1].contains("make it warmer"));
        assert!(!prompts[1].contains("Can we move our meeting to Friday?"));
    }
}
