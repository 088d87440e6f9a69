//! # Stats Subcommand
//!
//! Prints the monitoring statistics snapshot.

use anyhow::Context;
use clap::Args;

/// Arguments for `regwatch stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Print the raw JSON payload instead of the summary lines.
    #[arg(long)]
    pub json: bool,
}

/// Run `regwatch stats`.
pub async fn run_stats(args: &StatsArgs, api_url: Option<&str>) -> anyhow::Result<u8> {
    let client = crate::build_client(api_url)?;
    let stats = client.get_stats().await.context("fetching stats")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(0);
    }

    println!("Sources monitored : {}/{}", stats.sources_monitored, stats.total_sources);
    println!("Changes this month: {}", stats.changes_this_month);
    println!("High-risk alerts  : {}", stats.high_risk_alerts);
    println!("Critical alerts   : {}", stats.critical_alerts);
    Ok(0)
}
