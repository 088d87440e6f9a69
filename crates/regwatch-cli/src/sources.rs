//! # Sources Subcommand
//!
//! Lists the monitored source registry.

use anyhow::Context;
use clap::Args;

/// Arguments for `regwatch sources`.
#[derive(Args, Debug)]
pub struct SourcesArgs {
    /// Only show sources with monitoring switched on.
    #[arg(long)]
    pub monitored: bool,
}

/// Run `regwatch sources`.
pub async fn run_sources(args: &SourcesArgs, api_url: Option<&str>) -> anyhow::Result<u8> {
    let client = crate::build_client(api_url)?;
    let mut sources = client.get_sources().await.context("fetching sources")?;

    if args.monitored {
        sources.retain(|s| s.monitoring);
    }

    if sources.is_empty() {
        println!("No sources registered.");
        return Ok(0);
    }

    for source in &sources {
        let monitoring = if source.monitoring { "on" } else { "off" };
        let last_checked = source
            .last_checked
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());
        println!(
            "{:<12}  {:<8}  monitoring {:<3}  checked {}  {} ({})",
            source.id.as_str(),
            source.status.as_str(),
            monitoring,
            last_checked,
            source.name,
            source.category
        );
    }
    Ok(0)
}
