//! /history and /transcript commands

use super::CommandResult;
use crate::utils::truncate_chars;
use lexi_agent::{ConversationState, HISTORY_LIMIT};

pub struct HistoryCommand;

impl HistoryCommand {
    pub fn execute(state: &ConversationState) -> CommandResult {
        let history = state.history();
        if history.is_empty() {
            return CommandResult::Message("No replies drafted yet.".to_string());
        }

        let mut output = format!("Recent requests (last {}):\n", HISTORY_LIMIT);
        for (i, exchange) in history.iter().enumerate() {
            output.push_str(&format!(
                "\n{}. {}\n   -> {}\n",
                i + 1,
                preview(&exchange.request),
                preview(&exchange.response)
            ));
        }
        CommandResult::Message(output.trim_end().to_string())
    }
}

pub struct TranscriptCommand;

impl TranscriptCommand {
    pub fn execute(state: &ConversationState) -> CommandResult {
        let messages = state.messages();
        if messages.is_empty() {
            return CommandResult::Message("The conversation is empty.".to_string());
        }

        let mut output = String::new();
        for message in messages {
            output.push_str(&format!("{}:\n{}\n\n", message.role.label(), message.content));
        }
        CommandResult::Message(output.trim_end().to_string())
    }
}

fn preview(text: &str) -> String {
    truncate_chars(&text.replace('\n', " "), 70)
}
