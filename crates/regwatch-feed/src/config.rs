//! Feed provider configuration.
//!
//! Configures the upstream documents API. When no feed URL is configured,
//! the stack falls back to the static fixture provider — the env-selected
//! capability split between live and demo data.

use url::Url;

use crate::error::ConfigError;

/// Environment variable naming the upstream feed base URL.
pub const FEED_URL_VAR: &str = "REGWATCH_FEED_URL";

/// Configuration for the remote feed provider.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Base URL of the upstream publication site
    /// (e.g. `https://www.meity.gov.in`).
    pub base_url: Url,
    /// Identifier assigned to changes ingested from this feed.
    pub source_id: String,
    /// Display name assigned to changes ingested from this feed.
    pub source_name: String,
    /// Sector annotation for ingested changes.
    pub affected_sector: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl FeedConfig {
    /// Create a configuration for the given base URL with the default
    /// source identity and timeout.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            source_id: "meity".to_string(),
            source_name: "MeitY Press Release".to_string(),
            affected_sector: "Technology, Data Protection".to_string(),
            timeout_secs: 15,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `REGWATCH_FEED_URL` — upstream base URL; `None` when absent
    ///   (callers fall back to the static provider)
    /// - `REGWATCH_FEED_SOURCE_ID` (default `meity`)
    /// - `REGWATCH_FEED_SOURCE_NAME` (default `MeitY Press Release`)
    /// - `REGWATCH_FEED_TIMEOUT_SECS` (default 15)
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let raw = match std::env::var(FEED_URL_VAR) {
            Ok(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(None),
        };
        let base_url = Url::parse(raw.trim())
            .map_err(|e| ConfigError::InvalidUrl(FEED_URL_VAR.to_string(), e.to_string()))?;

        let mut config = Self::new(base_url);
        if let Ok(id) = std::env::var("REGWATCH_FEED_SOURCE_ID") {
            config.source_id = id;
        }
        if let Ok(name) = std::env::var("REGWATCH_FEED_SOURCE_NAME") {
            config.source_name = name;
        }
        if let Ok(secs) = std::env::var("REGWATCH_FEED_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                config.timeout_secs = secs;
            }
        }
        Ok(Some(config))
    }
}
