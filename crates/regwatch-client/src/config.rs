//! Client configuration.

use url::Url;

use crate::error::ApiClientError;

/// Default API base URL for local development.
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Configuration for connecting to the RegWatch API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the RegWatch API. Every endpoint — the analysis
    /// endpoint included — derives from this one URL.
    pub base_url: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Create a configuration for the given base URL with the default
    /// timeout.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout_secs: 30,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `REGWATCH_API_URL` (default `http://localhost:8000`)
    /// - `REGWATCH_API_TIMEOUT_SECS` (default 30)
    pub fn from_env() -> Result<Self, ApiClientError> {
        let raw = std::env::var("REGWATCH_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(raw.trim())
            .map_err(|e| ApiClientError::Config(format!("REGWATCH_API_URL: {e}")))?;

        let mut config = Self::new(base_url);
        if let Some(secs) = std::env::var("REGWATCH_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.timeout_secs = secs;
        }
        Ok(config)
    }
}
