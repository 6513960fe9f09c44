//! The drafting loop: first draft, revisions, and starting over.

use crate::client::ReplyClient;
use crate::conversation::{ConversationState, Role, Stage};
use crate::error::Result;

/// Transcript entry recorded for a new email request
pub fn format_email_request(style: &str, email: &str) -> String {
    format!("**Style**\n{style}\n\n**Email**\n{email}")
}

/// Transcript entry recorded for a change request
pub fn format_change_request(changes: &str) -> String {
    format!("**Change request**\n{changes}")
}

/// Couples one session's [`ConversationState`] with a [`ReplyClient`].
///
/// The state is created lazily by the first interaction. Each action makes at
/// most one backend call and only touches the draft, history and stage once
/// that call succeeds. A failed call leaves them as they were so the user can
/// retry.
pub struct Assistant {
    client: ReplyClient,
    state: Option<ConversationState>,
}

impl Assistant {
    pub fn new(client: ReplyClient) -> Self {
        Self {
            client,
            state: None,
        }
    }

    /// Session state, created on first access
    pub fn state(&mut self) -> &ConversationState {
        self.session()
    }

    pub fn stage(&mut self) -> Stage {
        self.session().stage()
    }

    /// Swap the backend (e.g. after a model change), keeping the conversation
    pub fn replace_client(&mut self, client: ReplyClient) {
        self.client = client;
    }

    /// Draft a first reply to `email`. Expects [`Stage::AwaitingNewEmail`].
    pub async fn generate_reply(&mut self, style: &str, email: &str) -> Result<&str> {
        self.session()
            .record_message(Role::User, format_email_request(style, email));

        let reply = self.client.draft(style, email).await?;
        self.accept_reply(email, reply);
        Ok(self.session().last_reply())
    }

    /// Revise the current draft. Expects [`Stage::AwaitingFollowupChoice`].
    pub async fn request_changes(&mut self, changes: &str) -> Result<&str> {
        let state = ConversationState::initialize(&mut self.state);
        debug_assert_eq!(state.stage(), Stage::AwaitingFollowupChoice);
        state.record_message(Role::User, format_change_request(changes));

        let reply = self.client.revise(changes, state.last_reply()).await?;
        self.accept_reply(changes, reply);
        Ok(self.session().last_reply())
    }

    /// Go back to asking for a new email. The transcript and history are kept.
    pub fn start_new_email(&mut self) {
        self.session().advance_stage(Stage::AwaitingNewEmail);
    }

    fn session(&mut self) -> &mut ConversationState {
        ConversationState::initialize(&mut self.state)
    }

    fn accept_reply(&mut self, request: &str, reply: String) {
        let state = self.session();
        state.set_last_reply(reply.clone());
        state.record_message(Role::Assistant, reply.clone());
        state.record_exchange(request, reply);
        state.advance_stage(Stage::AwaitingFollowupChoice);
    }
}
