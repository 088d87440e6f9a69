//! Typed client for the generative language model service.
//!
//! Speaks the `generateContent` REST shape: prompt text in, candidate text
//! out. Analyses run at temperature 0 so repeated requests over the same
//! update converge.

use std::time::Duration;

use serde::Deserialize;

use crate::error::AgentError;

/// Default service base URL.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model identifier.
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Configuration for the LLM client.
///
/// Custom `Debug` redacts the API key to prevent credential leakage in logs.
#[derive(Clone)]
pub struct LlmConfig {
    /// Service base URL.
    pub base_url: url::Url,
    /// Model identifier.
    pub model: String,
    /// API key.
    pub api_key: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("base_url", &self.base_url.as_str())
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl LlmConfig {
    /// Create a configuration with the default service URL and model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: url::Url::parse(DEFAULT_BASE_URL).expect("default URL is valid"),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            timeout_secs: 30,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `REGWATCH_LLM_API_KEY` (falls back to `GEMINI_API_KEY`) — returns
    ///   `None` when neither is set, so callers can run without analysis
    /// - `REGWATCH_LLM_URL` (default `https://generativelanguage.googleapis.com`)
    /// - `REGWATCH_LLM_MODEL` (default `gemini-2.5-flash`)
    pub fn from_env() -> Result<Option<Self>, AgentError> {
        let api_key = std::env::var("REGWATCH_LLM_API_KEY")
            .or_else(|_| std::env::var("GEMINI_API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty());
        let Some(api_key) = api_key else {
            return Ok(None);
        };

        let mut config = Self::new(api_key);
        if let Ok(raw) = std::env::var("REGWATCH_LLM_URL") {
            config.base_url = url::Url::parse(raw.trim())
                .map_err(|e| AgentError::Config(format!("REGWATCH_LLM_URL: {e}")))?;
        }
        if let Ok(model) = std::env::var("REGWATCH_LLM_MODEL") {
            config.model = model;
        }
        Ok(Some(config))
    }
}

// -- Response shape ----------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

// -- Client ------------------------------------------------------------------

/// Client for the generative language model service.
#[derive(Debug, Clone)]
pub struct LlmClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl LlmClient {
    /// Build a client from configuration.
    pub fn new(config: LlmConfig) -> Result<Self, AgentError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AgentError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Generate a completion for the prompt and return the candidate text.
    pub async fn generate(&self, prompt: &str) -> Result<String, AgentError> {
        let endpoint = format!("POST /v1beta/models/{}:generateContent", self.config.model);
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.as_str().trim_end_matches('/'),
            self.config.model
        );

        let body = serde_json::json!({
            "contents": [{"parts": [{"text": prompt}]}],
            "generationConfig": {"temperature": 0},
        });

        let resp = self
            .http
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| AgentError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(AgentError::Api { status, body });
        }

        let parsed: GenerateContentResponse =
            resp.json().await.map_err(|e| AgentError::Deserialization {
                endpoint,
                source: e,
            })?;

        let text: String = parsed
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AgentError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Strip markdown code fences from a model response.
///
/// Models occasionally wrap the JSON in ```` ```json ```` fences despite
/// the instruction not to; the payload inside is kept verbatim.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}
