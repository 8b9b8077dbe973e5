//! scout CLI - Main entry point

mod cli;
mod cost;
mod report;

use anyhow::Context;
use clap::Parser;
use scout_agent::{resolve_request, Mode};
use scout_foundation::ScoutConfig;
use std::fmt::Display;
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// scout - explore a codebase with an LLM agent and write a Markdown report
#[derive(Parser, Debug)]
#[command(name = "scout")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The request to the agent (prompted for when missing)
    #[arg(long)]
    request: Option<String>,

    /// Agent mode: docs, code, mermaid or testing
    #[arg(long, default_value = "code")]
    mode: String,

    /// Model to use (overrides config and SCOUT_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Do not ask for a GitHub README in docs mode
    #[arg(long)]
    no_readme: bool,

    /// File to write the report to
    #[arg(long)]
    output_file: Option<PathBuf>,

    /// Rewrite the report with a second model before writing it
    #[arg(long)]
    rewrite_output: bool,

    /// Maximum agent turns
    #[arg(long)]
    max_turns: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr, stdout carries the report
    let log_level = if args.debug { "scout=debug" } else { "scout=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let working_dir = std::env::current_dir().context("cannot read the current directory")?;
    let mut config = ScoutConfig::load(&working_dir)?;
    if args.model.is_some() {
        config.model = args.model;
    }
    if args.max_turns.is_some() {
        config.max_turns = args.max_turns;
    }

    let mode: Mode = match args.mode.parse() {
        Ok(mode) => mode,
        Err(e) => fail(e),
    };

    let given = match args.request {
        Some(request) => Some(request),
        None if !mode.has_default_request() => read_request()?,
        None => None,
    };
    let request = match resolve_request(mode, given.as_deref(), args.no_readme) {
        Some(request) => request,
        None => fail("No request provided or inferrable from mode"),
    };

    let api_key = match config.api_key(|key| std::env::var(key).ok()) {
        Ok(key) => key,
        Err(e) => fail(e),
    };

    cli::run_once(
        &config,
        &working_dir,
        cli::RunRequest {
            mode,
            request,
            api_key,
            rewrite_output: args.rewrite_output,
            output_file: args.output_file,
        },
    )
    .await?;

    Ok(())
}

/// One line from stdin, with a prompt when attached to a terminal
fn read_request() -> anyhow::Result<Option<String>> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprint!("Enter a request: ");
        std::io::stderr().flush()?;
    }

    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    let line = line.trim();
    Ok((!line.is_empty()).then(|| line.to_string()))
}

fn fail(message: impl Display) -> ! {
    eprintln!("{}", message);
    std::process::exit(1)
}
