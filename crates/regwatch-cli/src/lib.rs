//! # regwatch-cli — CLI Tool for RegWatch
//!
//! Provides the `regwatch` command-line interface over the RegWatch API
//! and the upstream feed.
//!
//! ## Subcommands
//!
//! - `regwatch changes` — List detected changes with filters.
//! - `regwatch sources` — List monitored sources.
//! - `regwatch stats` — Show the monitoring statistics snapshot.
//! - `regwatch analyze` — Analyze a regulatory update.
//! - `regwatch fetch` — Pull a page directly from the upstream feed.

pub mod analyze;
pub mod changes;
pub mod fetch;
pub mod sources;
pub mod stats;

use anyhow::Context;
use regwatch_client::{ApiClient, ClientConfig};

/// Build an API client: environment configuration, with an optional
/// command-line base URL override.
pub fn build_client(api_url: Option<&str>) -> anyhow::Result<ApiClient> {
    let mut config = ClientConfig::from_env().context("loading client configuration")?;
    if let Some(raw) = api_url {
        config.base_url = url::Url::parse(raw).context("parsing --api-url")?;
    }
    ApiClient::new(config).context("building API client")
}
