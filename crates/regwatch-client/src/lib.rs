//! # regwatch-client — Typed Client for the RegWatch API
//!
//! Ergonomic, typed access to the RegWatch API surface: changes, sources,
//! stats, health, and the analysis endpoint.
//!
//! ## Analysis-request orchestration
//!
//! [`ApiClient::analyze_update`] fails fast on empty input (no network
//! call), issues exactly one request, and does not retry. A busy flag on
//! the client handle guarantees at most one analysis request in flight at
//! a time — a concurrent second call fails with
//! [`ApiClientError::AnalysisInFlight`] without touching the network.
//! There is no cancellation: a caller that stops awaiting simply discards
//! the result when it resolves.

pub mod config;
pub mod error;

pub use config::ClientConfig;
pub use error::ApiClientError;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use regwatch_core::{
    AnalysisResult, ChangeFilter, ChangeRecord, ChangesPage, SourceRecord, Stats,
};

/// Envelope of `GET /api/sources`.
#[derive(Debug, Deserialize)]
struct SourceListResponse {
    #[serde(default)]
    sources: Vec<SourceRecord>,
}

/// Typed client for the RegWatch API.
///
/// Cloning shares the underlying connection pool and the analysis busy
/// flag: clones count as the same handle for single-flight purposes.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: url::Url,
    analysis_busy: Arc<AtomicBool>,
}

/// Releases the busy flag when the analysis call resolves, including on
/// early return and panic unwind.
struct FlightGuard<'a>(&'a AtomicBool);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ApiClient {
    /// Create a new client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ApiClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiClientError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.base_url,
            analysis_busy: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Create a client from the environment.
    pub fn from_env() -> Result<Self, ApiClientError> {
        Self::new(ClientConfig::from_env()?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiClientError> {
        let endpoint = format!("GET {path}");
        let resp = self
            .http
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(|e| ApiClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;
        Self::into_json(resp, endpoint).await
    }

    async fn into_json<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
        endpoint: String,
    ) -> Result<T, ApiClientError> {
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiClientError::Api {
                endpoint,
                status,
                body,
            });
        }
        resp.json().await.map_err(|e| ApiClientError::Deserialization {
            endpoint,
            source: e,
        })
    }

    /// GET /health — the service health payload, as returned.
    pub async fn health(&self) -> Result<serde_json::Value, ApiClientError> {
        self.get_json("/health", &[]).await
    }

    /// GET /api/changes — one page of changes, newest first.
    pub async fn get_changes(&self, page: u32, limit: u32) -> Result<ChangesPage, ApiClientError> {
        self.get_json(
            "/api/changes",
            &[("page", page.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    /// GET /api/changes with server-side filters applied before pagination.
    pub async fn search_changes(
        &self,
        filter: &ChangeFilter,
        page: u32,
        limit: u32,
    ) -> Result<ChangesPage, ApiClientError> {
        let mut query = vec![("page", page.to_string()), ("limit", limit.to_string())];
        if let Some(risk) = filter.risk {
            query.push(("risk", risk.to_string()));
        }
        if let Some(source) = &filter.source {
            query.push(("source", source.to_string()));
        }
        if !filter.query.is_empty() {
            query.push(("q", filter.query.clone()));
        }
        self.get_json("/api/changes", &query).await
    }

    /// GET /api/changes/:id — `None` on 404.
    pub async fn get_change(&self, id: &str) -> Result<Option<ChangeRecord>, ApiClientError> {
        let path = format!("/api/changes/{id}");
        let endpoint = format!("GET {path}");
        let resp = self
            .http
            .get(self.url(&path))
            .send()
            .await
            .map_err(|e| ApiClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::into_json(resp, endpoint).await.map(Some)
    }

    /// GET /api/stats — the aggregate statistics.
    pub async fn get_stats(&self) -> Result<Stats, ApiClientError> {
        self.get_json("/api/stats", &[]).await
    }

    /// GET /api/sources — all registered sources.
    pub async fn get_sources(&self) -> Result<Vec<SourceRecord>, ApiClientError> {
        let listing: SourceListResponse = self.get_json("/api/sources", &[]).await?;
        Ok(listing.sources)
    }

    /// POST /api/sources — register a source.
    pub async fn create_source(
        &self,
        name: &str,
        url: &str,
        category: &str,
    ) -> Result<SourceRecord, ApiClientError> {
        let endpoint = "POST /api/sources".to_string();
        let resp = self
            .http
            .post(self.url("/api/sources"))
            .json(&serde_json::json!({"name": name, "url": url, "category": category}))
            .send()
            .await
            .map_err(|e| ApiClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;
        Self::into_json(resp, endpoint).await
    }

    /// PUT /api/sources/:id — replace name, url, and category.
    pub async fn update_source(
        &self,
        id: &str,
        name: &str,
        url: &str,
        category: &str,
    ) -> Result<SourceRecord, ApiClientError> {
        let path = format!("/api/sources/{id}");
        let endpoint = format!("PUT {path}");
        let resp = self
            .http
            .put(self.url(&path))
            .json(&serde_json::json!({"name": name, "url": url, "category": category}))
            .send()
            .await
            .map_err(|e| ApiClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;
        Self::into_json(resp, endpoint).await
    }

    /// DELETE /api/sources/:id — `false` when the id was unknown.
    pub async fn delete_source(&self, id: &str) -> Result<bool, ApiClientError> {
        let path = format!("/api/sources/{id}");
        let endpoint = format!("DELETE {path}");
        let resp = self
            .http
            .delete(self.url(&path))
            .send()
            .await
            .map_err(|e| ApiClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;
        match resp.status() {
            reqwest::StatusCode::NOT_FOUND => Ok(false),
            s if s.is_success() => Ok(true),
            s => {
                let body = resp.text().await.unwrap_or_default();
                Err(ApiClientError::Api {
                    endpoint,
                    status: s.as_u16(),
                    body,
                })
            }
        }
    }

    /// POST /api/sources/:id/toggle — flip monitoring.
    pub async fn toggle_source(&self, id: &str) -> Result<SourceRecord, ApiClientError> {
        let path = format!("/api/sources/{id}/toggle");
        let endpoint = format!("POST {path}");
        let resp = self
            .http
            .post(self.url(&path))
            .send()
            .await
            .map_err(|e| ApiClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;
        Self::into_json(resp, endpoint).await
    }

    /// POST /api/analyze-update — analyze a regulatory update.
    ///
    /// Fails fast on empty input and when an analysis is already in flight
    /// on this handle; in both cases no request is issued. Failures are
    /// surfaced once — nothing is retried.
    pub async fn analyze_update(&self, text: &str) -> Result<AnalysisResult, ApiClientError> {
        if text.trim().is_empty() {
            return Err(ApiClientError::EmptyUpdateText);
        }
        if self
            .analysis_busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ApiClientError::AnalysisInFlight);
        }
        let _guard = FlightGuard(&self.analysis_busy);
        tracing::debug!(chars = text.len(), "submitting analysis request");

        let endpoint = "POST /api/analyze-update".to_string();
        let resp = self
            .http
            .post(self.url("/api/analyze-update"))
            .json(&serde_json::json!({"update_text": text}))
            .send()
            .await
            .map_err(|e| ApiClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;
        Self::into_json(resp, endpoint).await
    }
}
