//! Conversation state: stage, latest draft, transcript and the history window.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of request/response pairs kept in the history window
pub const HISTORY_LIMIT: usize = 5;

/// Which inputs the front end should ask for next
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Gather style instructions and a received email
    #[default]
    AwaitingNewEmail,
    /// A draft exists; ask for changes or a new email
    AwaitingFollowupChoice,
}

impl Stage {
    /// Whether moving from `self` to `next` is part of the conversation flow
    pub fn can_transition_to(self, next: Stage) -> bool {
        matches!(
            (self, next),
            (Stage::AwaitingNewEmail, Stage::AwaitingFollowupChoice)
                | (Stage::AwaitingFollowupChoice, Stage::AwaitingFollowupChoice)
                | (Stage::AwaitingFollowupChoice, Stage::AwaitingNewEmail)
        )
    }
}

/// Author of a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Label shown in the transcript
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "Lexi",
        }
    }

    /// Get the role as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a role name that is neither `user` nor `assistant`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown message role: {0:?}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    /// Unix time in milliseconds
    pub timestamp: i64,
}

/// A request and the reply it produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub request: String,
    pub response: String,
}

/// Per-session conversation state.
///
/// Fields are only changed through the `record_*`/`advance_stage` methods so
/// the history cap and stage flow hold after every mutation. Each session owns
/// its own instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationState {
    stage: Stage,
    last_reply: String,
    messages: Vec<ChatMessage>,
    history: Vec<Exchange>,
}

impl ConversationState {
    /// Create a fresh state: awaiting a new email, no draft, empty logs
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the state in `slot` if it does not exist yet and return it.
    ///
    /// Existing state is left untouched, so this can run on every interaction.
    pub fn initialize(slot: &mut Option<ConversationState>) -> &mut ConversationState {
        slot.get_or_insert_with(|| {
            tracing::debug!("initializing conversation state");
            ConversationState::new()
        })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The most recent successful draft, empty before the first one
    pub fn last_reply(&self) -> &str {
        &self.last_reply
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The last [`HISTORY_LIMIT`] exchanges, oldest first
    pub fn history(&self) -> &[Exchange] {
        &self.history
    }

    /// Append a transcript entry
    pub fn record_message(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(ChatMessage {
            role,
            content: content.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        });
    }

    /// Append an exchange, evicting the oldest ones beyond [`HISTORY_LIMIT`]
    pub fn record_exchange(&mut self, request: impl Into<String>, response: impl Into<String>) {
        self.history.push(Exchange {
            request: request.into(),
            response: response.into(),
        });
        if self.history.len() > HISTORY_LIMIT {
            let excess = self.history.len() - HISTORY_LIMIT;
            self.history.drain(..excess);
        }
    }

    /// Replace the latest draft. Only call with a successful generation.
    pub fn set_last_reply(&mut self, reply: impl Into<String>) {
        self.last_reply = reply.into();
    }

    /// Move to `next`. Transitions outside the conversation flow are caller bugs.
    pub fn advance_stage(&mut self, next: Stage) {
        debug_assert!(
            self.stage.can_transition_to(next),
            "invalid stage transition {:?} -> {:?}",
            self.stage,
            next
        );
        if self.stage != next {
            tracing::info!(from = ?self.stage, to = ?next, "stage changed");
        }
        self.stage = next;
    }
}
