// ABOUTME: artctx command-line tool - research an artist's context, parse saved answers, summarize.
// ABOUTME: Loads settings from the environment (and .env), logs to stderr, prints JSON to stdout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use artctx::pipeline::{SUMMARY_FALLBACK, structure_answer};
use artctx::prelude::*;

#[derive(Parser)]
#[command(name = "artctx")]
#[command(about = "Research the historical context around an artist")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the researcher (and historian) and print the structured records
    Research {
        /// Artist to research
        #[arg(long)]
        artist: String,

        /// Aspect to research: political-events, art-movements, artist-network,
        /// personal-events, economic-events, genre, or medium
        #[arg(long)]
        scope: Scope,

        /// Artwork to focus the research on
        #[arg(long)]
        artwork: Option<String>,
    },

    /// Parse and validate a saved agent answer without calling any service
    Parse {
        /// Schema to parse against
        #[arg(long)]
        scope: Scope,

        /// File holding the agent's final answer
        file: PathBuf,
    },

    /// Summarize how a list of events influenced an artist's work
    Summarize {
        /// Artist the events relate to
        #[arg(long)]
        artist: String,

        /// JSON file with an array of {"title": ..., "snippet": ...} objects
        events: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("artctx=debug,info")
    } else {
        EnvFilter::new("artctx=info,warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn research(artist: String, scope: Scope, artwork: Option<String>) -> Result<()> {
    let config = Config::from_env().context("loading configuration")?;
    let orchestrator = Orchestrator::from_config(&config)?;

    let mut request = ContextRequest::new(artist, scope);
    if let Some(title) = artwork {
        request = request.artwork(title);
    }

    tracing::info!(artist = %request.artist_name, %scope, "starting research");
    let result = orchestrator.run(&request).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "research failed");
    }

    print_json(&ContextResponse::from_result(scope, result))
}

fn parse_file(scope: Scope, file: PathBuf) -> Result<()> {
    let answer = std::fs::read_to_string(&file)
        .with_context(|| format!("reading {}", file.display()))?;

    let result = structure_answer(answer, scope).map_err(ArtctxError::from);
    print_json(&ContextResponse::from_result(scope, result))
}

async fn summarize(artist: String, events: PathBuf) -> Result<()> {
    let raw = std::fs::read_to_string(&events)
        .with_context(|| format!("reading {}", events.display()))?;
    let events: Vec<EventSnippet> =
        serde_json::from_str(&raw).context("events file must be a JSON array of events")?;

    let config = Config::from_env().context("loading configuration")?;
    let mut client = OpenAIClient::new(&config.openai_api_key);
    if let Some(base) = &config.openai_api_base {
        client = client.with_api_base(base);
    }

    let summary = summarize_influence(&client, &config.model, &artist, &events).await;
    if summary == SUMMARY_FALLBACK {
        tracing::warn!(%artist, "falling back to the default summary");
    }

    print_json(&serde_json::json!({ "summary": summary }))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Research {
            artist,
            scope,
            artwork,
        } => research(artist, scope, artwork).await,
        Command::Parse { scope, file } => parse_file(scope, file),
        Command::Summarize { artist, events } => summarize(artist, events).await,
    }
}
