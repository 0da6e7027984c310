//! Event Check
//!
//! Validates event documents offline: every document goes through the same
//! presence contract, derivation, and rules as a live submission.

use clap::Parser;
use core_config::tracing::{init_tracing_with_default, install_color_eyre};
use core_config::FromEnv;
use domain_events::{EventService, InMemoryEventRepository};
use eyre::Result;
use std::process::ExitCode;
use tracing::info;

mod check;
mod config;
mod report;

use check::{Checker, Outcome, STDIN};
use config::{Config, Format};

#[derive(Parser, Debug)]
#[command(name = "event-check", version, about = "Check event documents against the event rules")]
struct Cli {
    /// JSON files holding one event object or an array of them (`-` or none: stdin)
    files: Vec<String>,

    /// Report format [env: EVENT_CHECK_FORMAT]
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Verbose logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    install_color_eyre();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::from(2)
        }
    }
}

/// Returns whether every document was accepted
async fn run(cli: Cli) -> Result<bool> {
    let config = Config::from_env()?;
    init_tracing_with_default(&config.environment, if cli.verbose { "debug" } else { "warn" });
    info!(app = %config.app, "Starting");

    let format = cli.format.unwrap_or(config.format);
    let sources = if cli.files.is_empty() {
        vec![STDIN.to_string()]
    } else {
        cli.files
    };

    let checker = Checker::new(EventService::new(InMemoryEventRepository::new()));
    let mut outcomes: Vec<Outcome> = Vec::new();
    for source in &sources {
        let text = check::read_source(source)?;
        for (label, document) in check::split_documents(source, &text) {
            outcomes.push(checker.check(label, document).await?);
        }
    }

    let accepted = outcomes.iter().filter(|o| o.is_accepted()).count();
    info!(accepted, rejected = outcomes.len() - accepted, "Checked documents");

    report::write_report(&mut std::io::stdout().lock(), format, &outcomes)?;
    Ok(accepted == outcomes.len())
}
