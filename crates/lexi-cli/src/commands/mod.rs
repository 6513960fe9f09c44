//! Slash commands for interactive mode

mod history;
mod model;
mod session;

pub use history::{HistoryCommand, TranscriptCommand};
pub use model::ModelCommand;
pub use session::SessionCommand;

use lexi_agent::ConversationState;
use lexi_ai::Model;

/// Result of executing a slash command
#[derive(Debug)]
pub enum CommandResult {
    /// Drop the current draft flow and ask for a new email
    NewEmail,
    /// Change the model
    ChangeModel(Model),
    /// Show a message to the user
    Message(String),
    /// Exit the application
    Exit,
    /// Unknown command
    Unknown(String),
}

/// Command names `execute_command` dispatches on, aliases included
const COMMAND_NAMES: &[&str] = &[
    "help", "h", "?", "history", "transcript", "t", "session", "s", "model", "m", "new", "n",
    "quit", "exit", "q",
];

/// Whether `input` starts with a known slash command
pub fn is_command(input: &str) -> bool {
    input
        .trim()
        .strip_prefix('/')
        .and_then(|rest| rest.split(' ').next())
        .is_some_and(|name| COMMAND_NAMES.contains(&name.to_lowercase().as_str()))
}

/// Parse and execute a slash command
pub fn execute_command(
    input: &str,
    state: &ConversationState,
    current_model: &Model,
    available_models: &[Model],
) -> Option<CommandResult> {
    let input = input.trim();
    let rest = input.strip_prefix('/')?;

    let mut parts = rest.splitn(2, ' ');
    let command = parts.next().unwrap_or("").to_lowercase();
    let args = parts.next().map(str::trim).unwrap_or("");

    Some(match command.as_str() {
        "help" | "h" | "?" => CommandResult::Message(help_message()),

        "history" => HistoryCommand::execute(state),

        "transcript" | "t" => TranscriptCommand::execute(state),

        "session" | "s" => SessionCommand::execute(state, current_model),

        "model" | "m" => ModelCommand::execute(args, current_model, available_models),

        "new" | "n" => CommandResult::NewEmail,

        "quit" | "exit" | "q" => CommandResult::Exit,

        _ => CommandResult::Unknown(command),
    })
}

fn help_message() -> String {
    r#"Available commands:
  /help, /h, /?        Show this help message
  /history             Show the last five requests and replies
  /transcript, /t      Show the whole conversation
  /session, /s         Show session info
  /model, /m [name]    List models or switch to a model
  /new, /n             Start over with a new email
  /quit, /exit, /q     Exit lexi

Examples:
  /model flash         Switch to the first model matching "flash"
  /new                 Reply to another email"#
        .to_string()
}
