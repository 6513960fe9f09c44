//! Model registry for the Gemini models lexi knows about.

use crate::Model;

/// Base URL of the Google Generative Language API
pub const GOOGLE_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when nothing else is configured
pub const DEFAULT_MODEL_ID: &str = "gemini-2.5-pro";

struct ModelEntry {
    id: &'static str,
    name: &'static str,
    context_window: u32,
    max_tokens: u32,
}

const MODEL_ENTRIES: &[ModelEntry] = &[
    ModelEntry {
        id: "gemini-2.5-pro",
        name: "Gemini 2.5 Pro",
        context_window: 1_048_576,
        max_tokens: 65_536,
    },
    ModelEntry {
        id: "gemini-2.5-flash",
        name: "Gemini 2.5 Flash",
        context_window: 1_048_576,
        max_tokens: 65_536,
    },
    ModelEntry {
        id: "gemini-2.5-flash-lite",
        name: "Gemini 2.5 Flash-Lite",
        context_window: 1_048_576,
        max_tokens: 65_536,
    },
    ModelEntry {
        id: "gemini-2.0-flash",
        name: "Gemini 2.0 Flash",
        context_window: 1_048_576,
        max_tokens: 8_192,
    },
];

impl ModelEntry {
    fn to_model(&self) -> Model {
        Model {
            id: self.id.to_string(),
            name: self.name.to_string(),
            base_url: GOOGLE_BASE_URL.to_string(),
            context_window: self.context_window,
            max_tokens: self.max_tokens,
        }
    }
}

/// Look up a registered model by ID.
pub fn get_model(id: &str) -> Option<Model> {
    MODEL_ENTRIES
        .iter()
        .find(|e| e.id == id)
        .map(ModelEntry::to_model)
}

/// Get all registered models.
pub fn get_all_models() -> Vec<Model> {
    MODEL_ENTRIES.iter().map(ModelEntry::to_model).collect()
}

/// Resolve a model ID, constructing a default entry for unknown IDs so that
/// newer models can be used before they are registered here.
pub fn resolve_model(id: &str) -> Model {
    get_model(id).unwrap_or_else(|| Model {
        id: id.to_string(),
        name: id.to_string(),
        base_url: GOOGLE_BASE_URL.to_string(),
        context_window: 128_000,
        max_tokens: 8_192,
    })
}
