//! Interactive terminal front end
//!
//! Drives the conversation stages: ask for style and email, show the draft,
//! then take change requests until the user starts over or quits.

use std::io::{self, BufRead, IsTerminal, Write};

use lexi_agent::{Assistant, ClientConfig, ReplyClient, Stage};
use lexi_ai::Model;

use crate::commands::{self, CommandResult};
use crate::spinner::Spinner;
use crate::utils::is_blank;

/// A line containing only this ends a multi-line block
pub const END_OF_BLOCK: &str = ".";

/// Answer to "what next?" after a draft is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowupChoice {
    Change,
    NewEmail,
    Quit,
}

impl FollowupChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "c" | "change" | "changes" => Some(FollowupChoice::Change),
            "n" | "new" => Some(FollowupChoice::NewEmail),
            "q" | "quit" | "exit" => Some(FollowupChoice::Quit),
            _ => None,
        }
    }
}

/// What to do after a slash command ran
enum Flow {
    Continue,
    Exit,
}

/// Read one line, without its line ending. `None` on EOF.
pub fn read_line(reader: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

/// Read lines until [`END_OF_BLOCK`] or EOF. `None` when EOF comes first.
///
/// A known slash command on the first line is returned on its own. Anything
/// else, including other lines starting with `/`, is part of the block.
pub fn read_block(reader: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut lines: Vec<String> = Vec::new();
    loop {
        let Some(line) = read_line(reader)? else {
            if lines.is_empty() {
                return Ok(None);
            }
            break;
        };
        if line.trim() == END_OF_BLOCK {
            break;
        }
        if lines.is_empty() && commands::is_command(&line) {
            return Ok(Some(line));
        }
        lines.push(line);
    }
    Ok(Some(lines.join("\n")))
}

fn prompt_line(prompt: &str) -> io::Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;
    read_line(&mut io::stdin().lock())
}

fn print_draft(reply: &str) {
    println!();
    println!("Drafted reply:");
    println!("{}", "-".repeat(40));
    println!("{}", reply);
    println!("{}", "-".repeat(40));
    println!();
}

fn report_error(error: &lexi_agent::Error) {
    eprintln!("\nError: {}", error);
    if error.is_retryable() {
        eprintln!("This looks temporary. Try again in a moment.");
    }
    eprintln!();
}

/// Interactive session state owned by the terminal loop
pub struct Repl {
    client_config: ClientConfig,
    available_models: Vec<Model>,
}

impl Repl {
    pub fn new(client_config: ClientConfig) -> Self {
        Self {
            client_config,
            available_models: lexi_ai::models::get_all_models(),
        }
    }

    /// Run until the user quits or stdin closes
    pub async fn run(&mut self, assistant: &mut Assistant) -> anyhow::Result<()> {
        if io::stderr().is_terminal() {
            eprintln!("Lexi - AI email reply assistant ({})", self.client_config.model.id);
            eprintln!("Type /help for commands.");
            eprintln!();
        }

        loop {
            match assistant.stage() {
                Stage::AwaitingNewEmail => {
                    println!("How should the reply be? (e.g. formal and concise, friendly and appreciative)");
                    let Some(style) = prompt_line("style> ")? else {
                        break;
                    };
                    if let Some(flow) = self.handle_command(&style, assistant) {
                        match flow {
                            Flow::Exit => break,
                            Flow::Continue => continue,
                        }
                    }

                    println!("Paste the email you received. Finish with a line containing only '{END_OF_BLOCK}'.");
                    let Some(email) = read_block(&mut io::stdin().lock())? else {
                        break;
                    };
                    if commands::is_command(&email) {
                        if let Some(flow) = self.handle_command(&email, assistant) {
                            match flow {
                                Flow::Exit => break,
                                Flow::Continue => continue,
                            }
                        }
                    }

                    if is_blank(&style) || is_blank(&email) {
                        println!("Please fill in both the style and the email.\n");
                        continue;
                    }

                    let spinner = Spinner::start("Lexi is drafting your reply...");
                    let result = assistant
                        .generate_reply(&style, &email)
                        .await
                        .map(str::to_string);
                    spinner.stop();

                    match result {
                        Ok(reply) => print_draft(&reply),
                        Err(e) => report_error(&e),
                    }
                }
                Stage::AwaitingFollowupChoice => {
                    let Some(input) = prompt_line("What next? [c]hange / [n]ew email / [q]uit > ")?
                    else {
                        break;
                    };
                    if let Some(flow) = self.handle_command(&input, assistant) {
                        match flow {
                            Flow::Exit => break,
                            Flow::Continue => continue,
                        }
                    }

                    match FollowupChoice::parse(&input) {
                        Some(FollowupChoice::Change) => self.request_changes(assistant).await?,
                        Some(FollowupChoice::NewEmail) => {
                            assistant.start_new_email();
                            println!();
                        }
                        Some(FollowupChoice::Quit) => break,
                        None => println!("Please answer c, n or q."),
                    }
                }
            }
        }

        Ok(())
    }

    async fn request_changes(&mut self, assistant: &mut Assistant) -> anyhow::Result<()> {
        println!("What changes should I make to the reply? (e.g. make it warmer, shorten to 4 sentences)");
        let Some(changes) = prompt_line("changes> ")? else {
            return Ok(());
        };
        if is_blank(&changes) {
            println!("Please describe the changes you want.\n");
            return Ok(());
        }

        let spinner = Spinner::start("Lexi is updating the reply...");
        let result = assistant
            .request_changes(&changes)
            .await
            .map(str::to_string);
        spinner.stop();

        match result {
            Ok(reply) => print_draft(&reply),
            Err(e) => report_error(&e),
        }
        Ok(())
    }

    fn handle_command(&mut self, input: &str, assistant: &mut Assistant) -> Option<Flow> {
        let result = commands::execute_command(
            input,
            assistant.state(),
            &self.client_config.model,
            &self.available_models,
        )?;

        match result {
            CommandResult::Exit => return Some(Flow::Exit),
            CommandResult::Message(msg) => println!("{}", msg),
            CommandResult::NewEmail => {
                if assistant.stage() == Stage::AwaitingFollowupChoice {
                    assistant.start_new_email();
                    println!("Starting over with a new email.");
                } else {
                    println!("Already waiting for a new email.");
                }
            }
            CommandResult::ChangeModel(model) => {
                // Keep a configured base_url override
                let config = ClientConfig {
                    model: Model {
                        base_url: self.client_config.model.base_url.clone(),
                        ..model
                    },
                    ..self.client_config.clone()
                };
                match ReplyClient::configure(&config) {
                    Ok(client) => {
                        assistant.replace_client(client);
                        tracing::info!(model = %config.model.id, "switched model");
                        println!("Switched to: {} ({})", config.model.id, config.model.name);
                        self.client_config = config;
                    }
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            CommandResult::Unknown(cmd) => {
                println!("Unknown command: /{}", cmd);
                println!("Type /help for available commands.");
            }
        }
        println!();
        Some(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_line_strips_line_endings() {
        let mut input = Cursor::new("formal\r\nnext\n");
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("formal"));
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("next"));
        assert_eq!(read_line(&mut input).unwrap(), None);
    }

    #[test]
    fn test_read_block_until_terminator() {
        let mut input = Cursor::new("Hi Lexi,\n\nCan we move our meeting?\n.\nleftover\n");
        assert_eq!(
            read_block(&mut input).unwrap().as_deref(),
            Some("Hi Lexi,\n\nCan we move our meeting?")
        );
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("leftover"));
    }

    #[test]
    fn test_read_block_until_eof() {
        let mut input = Cursor::new("line one\nline two");
        assert_eq!(
            read_block(&mut input).unwrap().as_deref(),
            Some("line one\nline two")
        );
        assert_eq!(read_block(&mut input).unwrap(), None);
    }

    #[test]
    fn test_read_block_empty() {
        let mut input = Cursor::new(".\n");
        assert_eq!(read_block(&mut input).unwrap().as_deref(), Some(""));
    }

    #[test]
    fn test_read_block_command_on_first_line() {
        let mut input = Cursor::new("/quit\nmore\n.\n");
        assert_eq!(read_block(&mut input).unwrap().as_deref(), Some("/quit"));
    }

    #[test]
    fn test_read_block_unknown_slash_first_line_is_text() {
        let mut input = Cursor::new("/var/log is full again
Can you check?
.
");
        assert_eq!(
            read_block(&mut input).unwrap().as_deref(),
            Some("/var/log is full again\nCan you check?")
        );
        assert!(!commands::is_command("/var/log is full again\nCan you check?"));
    }

    #[test]
    fn test_read_block_slash_later_is_text() {
        let mut input = Cursor::new("Hello\n/not a command\n.\n");
        assert_eq!(
            read_block(&mut input).unwrap().as_deref(),
            Some("Hello\n/not a command")
        );
    }

    #[test]
    fn test_followup_choice() {
        assert_eq!(FollowupChoice::parse("c"), Some(FollowupChoice::Change));
        assert_eq!(FollowupChoice::parse(" Change "), Some(FollowupChoice::Change));
        assert_eq!(FollowupChoice::parse("N"), Some(FollowupChoice::NewEmail));
        assert_eq!(FollowupChoice::parse("quit"), Some(FollowupChoice::Quit));
        assert_eq!(FollowupChoice::parse("maybe"), None);
    }
}
