//! # Fetch Subcommand
//!
//! Pulls a page straight from the configured upstream feed, bypassing the
//! API. Useful for checking what the monitor would ingest before running
//! the service.

use anyhow::{bail, Context};
use clap::Args;

use regwatch_feed::{FeedConfig, RemoteProvider};

/// Arguments for `regwatch fetch`.
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// 1-based upstream page number.
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Upstream page size.
    #[arg(long, default_value_t = 10)]
    pub limit: u32,

    /// Feed base URL (overrides REGWATCH_FEED_URL).
    #[arg(long)]
    pub feed_url: Option<String>,
}

/// Run `regwatch fetch`.
pub async fn run_fetch(args: &FetchArgs) -> anyhow::Result<u8> {
    let config = match &args.feed_url {
        Some(raw) => FeedConfig::new(url::Url::parse(raw).context("parsing --feed-url")?),
        None => match FeedConfig::from_env().context("loading feed configuration")? {
            Some(config) => config,
            None => bail!("no feed configured — set REGWATCH_FEED_URL or pass --feed-url"),
        },
    };

    let provider = RemoteProvider::new(config).context("building feed provider")?;
    let page = provider
        .fetch_page(args.page, args.limit)
        .await
        .context("fetching from upstream feed")?;

    println!(
        "Upstream page {}/{} - {} item(s) listed, {} relevant",
        page.page,
        page.total_pages,
        page.total,
        page.changes.len()
    );
    for change in &page.changes {
        let keywords = change
            .matched_keywords
            .as_deref()
            .unwrap_or_default()
            .join(", ");
        println!(
            "[{:<8}] {}  {} - {} (keywords: {keywords})",
            change.risk_level.as_str(),
            change.detected_at.format("%Y-%m-%d"),
            change.id.as_str(),
            change.change_summary
        );
    }
    Ok(0)
}
