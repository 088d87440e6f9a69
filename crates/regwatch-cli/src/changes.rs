//! # Changes Subcommand
//!
//! Lists detected changes from the API with server-side filtering.

use anyhow::Context;
use clap::Args;

use regwatch_core::{ChangeFilter, RiskLevel, SourceId};

/// Arguments for `regwatch changes`.
#[derive(Args, Debug)]
pub struct ChangesArgs {
    /// Filter by risk level (low | medium | high | critical).
    #[arg(long)]
    pub risk: Option<String>,

    /// Filter by source id.
    #[arg(long)]
    pub source: Option<String>,

    /// Case-insensitive text filter over summary and source name.
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// 1-based page number.
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Page size.
    #[arg(long, default_value_t = 10)]
    pub limit: u32,
}

impl ChangesArgs {
    /// Build the change filter, validating the risk and source values.
    pub fn filter(&self) -> anyhow::Result<ChangeFilter> {
        let risk = self
            .risk
            .as_deref()
            .filter(|r| *r != "all")
            .map(|r| r.parse::<RiskLevel>())
            .transpose()
            .context("invalid --risk value")?;
        let source = self
            .source
            .as_deref()
            .filter(|s| *s != "all")
            .map(|s| s.parse::<SourceId>())
            .transpose()
            .context("invalid --source value")?;
        Ok(ChangeFilter {
            risk,
            source,
            query: self.query.clone().unwrap_or_default(),
        })
    }
}

/// Run `regwatch changes`.
pub async fn run_changes(args: &ChangesArgs, api_url: Option<&str>) -> anyhow::Result<u8> {
    let filter = args.filter()?;
    let client = crate::build_client(api_url)?;
    let page = client
        .search_changes(&filter, args.page, args.limit)
        .await
        .context("fetching changes")?;

    if page.changes.is_empty() {
        println!("No changes match the current filters.");
        return Ok(0);
    }

    println!(
        "Page {}/{} - {} change(s) total",
        page.page, page.total_pages, page.total
    );
    for change in &page.changes {
        println!(
            "[{:<8}] {}  {:<12}  {} - {}",
            change.risk_level.as_str(),
            change.detected_at.format("%Y-%m-%d %H:%M"),
            change.id.as_str(),
            change.source_name,
            change.change_summary
        );
    }
    Ok(0)
}
