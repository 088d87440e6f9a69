//! # regwatch CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros; verbosity flags map to tracing filters.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use regwatch_cli::analyze::{run_analyze, AnalyzeArgs};
use regwatch_cli::changes::{run_changes, ChangesArgs};
use regwatch_cli::fetch::{run_fetch, FetchArgs};
use regwatch_cli::sources::{run_sources, SourcesArgs};
use regwatch_cli::stats::{run_stats, StatsArgs};

/// RegWatch CLI — compliance monitoring from the terminal.
///
/// Lists detected regulatory changes and monitored sources, shows the
/// statistics snapshot, runs AI analyses, and pulls the upstream feed.
#[derive(Parser, Debug)]
#[command(name = "regwatch", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Base URL of the RegWatch API (overrides REGWATCH_API_URL).
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List detected changes, with optional risk/source/text filters.
    Changes(ChangesArgs),

    /// List monitored sources.
    Sources(SourcesArgs),

    /// Show the monitoring statistics snapshot.
    Stats(StatsArgs),

    /// Analyze a regulatory update and print the structured result.
    Analyze(AnalyzeArgs),

    /// Pull a page directly from the upstream feed, bypassing the API.
    Fetch(FetchArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let api_url = cli.api_url.as_deref();
    let result = match cli.command {
        Commands::Changes(args) => run_changes(&args, api_url).await,
        Commands::Sources(args) => run_sources(&args, api_url).await,
        Commands::Stats(args) => run_stats(&args, api_url).await,
        Commands::Analyze(args) => run_analyze(&args, api_url).await,
        Commands::Fetch(args) => run_fetch(&args).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
