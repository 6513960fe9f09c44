//! /session command - show session info

use super::CommandResult;
use lexi_agent::{ConversationState, HISTORY_LIMIT, Role, Stage};
use lexi_ai::Model;

pub struct SessionCommand;

impl SessionCommand {
    pub fn execute(state: &ConversationState, model: &Model) -> CommandResult {
        let mut output = String::from("Session Info\n");
        output.push_str(&"-".repeat(40));
        output.push('\n');

        output.push_str(&format!("Model:      {} ({})\n", model.id, model.name));
        output.push_str(&format!("Stage:      {}\n", stage_name(state.stage())));
        output.push('\n');

        let user_msgs = state
            .messages()
            .iter()
            .filter(|m| m.role == Role::User)
            .count();
        let assistant_msgs = state.messages().len() - user_msgs;

        output.push_str(&format!("Messages:   {} total\n", state.messages().len()));
        output.push_str(&format!(
            "            {} from you, {} from Lexi\n",
            user_msgs, assistant_msgs
        ));
        output.push_str(&format!(
            "History:    {}/{} exchanges\n",
            state.history().len(),
            HISTORY_LIMIT
        ));
        output.push_str(&format!(
            "Draft:      {} characters",
            state.last_reply().chars().count()
        ));

        CommandResult::Message(output)
    }
}

fn stage_name(stage: Stage) -> &'static str {
    match stage {
        Stage::AwaitingNewEmail => "waiting for a new email",
        Stage::AwaitingFollowupChoice => "reviewing a draft",
    }
}
