//! Scripted backend for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use lexi_ai::{Generation, GenerationOptions, TextGenerator};

/// Returns queued results in order and records every prompt it receives.
/// An empty queue answers "done".
#[derive(Default)]
pub struct MockGenerator {
    responses: Mutex<VecDeque<lexi_ai::Result<Generation>>>,
    prompts: Mutex<Vec<String>>,
    options: Mutex<Vec<GenerationOptions>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies<'a>(replies: impl IntoIterator<Item = &'a str>) -> Self {
        let mock = Self::new();
        for reply in replies {
            mock.push_reply(reply);
        }
        mock
    }

    pub fn push_reply(&self, text: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(Generation::text(text)));
    }

    pub fn push_error(&self, error: lexi_ai::Error) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn last_options(&self) -> Option<GenerationOptions> {
        self.options.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> lexi_ai::Result<Generation> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.options.lock().unwrap().push(options.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Generation::text("done")))
    }
}
