//! # regwatch-feed — Upstream Change Ingestion
//!
//! Supplies the change and source records the rest of the stack consumes,
//! from one of two interchangeable backends:
//!
//! - [`RemoteProvider`] — the live upstream documents API (WordPress-style
//!   press-release listing), with keyword relevance filtering and risk
//!   scoring applied during ingestion.
//! - [`StaticProvider`] — an embedded fixture set for demos and tests.
//!
//! [`ChangeProvider`] wraps both behind one surface; selection happens once
//! at startup from configuration (`REGWATCH_FEED_URL` present → remote),
//! and callers never branch on the backend again.

pub mod config;
pub mod error;
pub mod fixtures;
pub mod relevance;
pub mod remote;

pub use config::FeedConfig;
pub use error::FeedError;
pub use fixtures::StaticProvider;
pub use remote::RemoteProvider;

use regwatch_core::{ChangeId, ChangeRecord, ChangesPage, SourceRecord};

/// A change data source: static fixtures or the live upstream feed.
#[derive(Debug, Clone)]
pub enum ChangeProvider {
    /// Embedded fixture records.
    Static(StaticProvider),
    /// Live upstream documents API.
    Remote(RemoteProvider),
}

impl ChangeProvider {
    /// Select a provider from the environment: remote when
    /// `REGWATCH_FEED_URL` is set, static otherwise.
    pub fn from_env() -> Result<Self, FeedError> {
        match FeedConfig::from_env()? {
            Some(config) => {
                tracing::info!(feed = %config.base_url, "using remote feed provider");
                Ok(Self::Remote(RemoteProvider::new(config)?))
            }
            None => {
                tracing::info!("no feed URL configured — using static fixture provider");
                Ok(Self::Static(StaticProvider::new()))
            }
        }
    }

    /// Short backend label for health reporting.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Static(_) => "static",
            Self::Remote(_) => "remote",
        }
    }

    /// The monitored sources this provider knows about.
    pub fn sources(&self) -> Vec<SourceRecord> {
        match self {
            Self::Static(p) => p.sources(),
            Self::Remote(p) => vec![p.source()],
        }
    }

    /// Fetch one page of changes, newest first.
    pub async fn fetch_page(&self, page: u32, limit: u32) -> Result<ChangesPage, FeedError> {
        match self {
            Self::Static(p) => p.fetch_page(page, limit).await,
            Self::Remote(p) => p.fetch_page(page, limit).await,
        }
    }

    /// Look up a single change by id.
    pub async fn fetch_change(&self, id: &ChangeId) -> Result<Option<ChangeRecord>, FeedError> {
        match self {
            Self::Static(p) => p.fetch_change(id).await,
            Self::Remote(p) => p.fetch_change(id).await,
        }
    }
}
