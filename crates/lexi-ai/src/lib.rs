//! lexi-ai: Text-generation backend abstraction
//!
//! This crate hides the hosted model API behind the [`TextGenerator`] trait and
//! ships a Google Generative AI (Gemini) implementation.

pub mod error;
pub mod models;
pub mod providers;
pub mod types;

pub use error::{Error, Result};
pub use providers::TextGenerator;
pub use types::*;
