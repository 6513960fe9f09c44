//! lexi - AI email reply assistant CLI

mod commands;
mod config;
mod spinner;
mod ui;
mod utils;

use clap::Parser;
use lexi_agent::{Assistant, ReplyClient};
use std::io::Read;

/// Log filter for `--verbose`. The binary's own target is `lexi`.
const VERBOSE_FILTER: &str = "lexi=debug,lexi_agent=debug,lexi_ai=debug";

/// lexi - drafts email replies and revises them on request
#[derive(Parser, Debug)]
#[command(name = "lexi")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Model to use (default: gemini-2.5-pro)
    #[arg(short, long)]
    model: Option<String>,

    /// Seconds to wait for a reply before giving up
    #[arg(long)]
    timeout: Option<u64>,

    /// Style instructions for a single non-interactive draft
    #[arg(short, long, requires = "email")]
    style: Option<String>,

    /// File holding the received email ("-" for stdin); used with --style
    #[arg(short, long, requires = "style")]
    email: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// List known models
    #[arg(long)]
    models: bool,

    /// Initialize config file
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Setup tracing
    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(VERBOSE_FILTER)
            .with_writer(std::io::stderr)
            .init();
    }

    // Initialize config and exit
    if args.init_config {
        match config::Config::init() {
            Ok(path) => {
                println!("Config file created at: {}", path.display());
                println!("\nExample config:\n{}", config::example_config());
            }
            Err(e) => {
                eprintln!("Error creating config: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    if args.models {
        for model in lexi_ai::models::get_all_models() {
            println!("{:<24} {}", model.id, model.name);
        }
        return Ok(());
    }

    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cfg = config::Config::load();
    let client_config = cfg.client_config(args.model.as_deref(), args.timeout);

    // Fail before asking for any input if the key is missing
    let client = match ReplyClient::configure(&client_config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("Set your API key with: export GEMINI_API_KEY=your-key");
            eprintln!("Or add it to a .env file or the config file: lexi --init-config");
            std::process::exit(1);
        }
    };

    // Non-interactive mode
    if let (Some(style), Some(email)) = (args.style, args.email) {
        return run_once(client, &style, &email).await;
    }

    let mut assistant = Assistant::new(client);
    ui::Repl::new(client_config).run(&mut assistant).await
}

async fn run_once(client: ReplyClient, style: &str, email_source: &str) -> anyhow::Result<()> {
    let email = if email_source == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(email_source)?
    };

    if utils::is_blank(style) || utils::is_blank(&email) {
        eprintln!("Error: both the style and the email must be non-empty");
        std::process::exit(1);
    }

    let spinner = spinner::Spinner::start("Lexi is drafting your reply...");
    let result = client.draft(style, &email).await;
    spinner.stop();

    match result {
        Ok(reply) => {
            println!("{}", reply);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn covered(target: &str) -> bool {
        VERBOSE_FILTER
            .split(',')
            .filter_map(|directive| directive.split_once('='))
            .any(|(prefix, _)| target == prefix || target.starts_with(&format!("{prefix}::")))
    }

    #[test]
    fn test_verbose_filter_covers_all_crates() {
        assert!(covered(module_path!()), "{} not covered", module_path!());
        assert!(covered("lexi::config"));
        assert!(covered("lexi::ui"));
        assert!(covered("lexi_agent::conversation"));
        assert!(covered("lexi_ai::providers::google"));
    }

    #[test]
    fn test_args_require_style_and_email_together() {
        assert!(Args::try_parse_from(["lexi", "--style", "formal"]).is_err());
        assert!(Args::try_parse_from(["lexi", "--email", "mail.txt"]).is_err());
        let args = Args::try_parse_from(["lexi", "-s", "formal", "-e", "-"]).unwrap();
        assert_eq!(args.style.as_deref(), Some("formal"));
        assert_eq!(args.email.as_deref(), Some("-"));
    }
}
