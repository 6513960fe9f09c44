//! lexi-agent: Conversation state and reply drafting
//!
//! This crate holds the per-session conversation state machine and the client
//! that turns style instructions plus an email into a drafted reply.

pub mod assistant;
pub mod client;
pub mod conversation;
pub mod error;
pub mod prompt;

#[cfg(test)]
mod mock;

pub use assistant::Assistant;
pub use client::{ClientConfig, ReplyClient};
pub use conversation::{ChatMessage, ConversationState, Exchange, HISTORY_LIMIT, Role, Stage};
pub use error::{Error, Result};
