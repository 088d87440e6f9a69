//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers via
//! the `State` extractor.
//!
//! ## Architecture
//!
//! The API owns two in-memory stores: the change records hydrated from the
//! configured feed provider, and the source registry seeded from the same
//! provider and mutated by the sources endpoints. Source mutations are
//! deliberately non-durable — they live exactly as long as the process.
//! The analysis pipeline, when configured, hangs off the state as well so
//! the analyze endpoint can reach it.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;

use regwatch_agent::Analyzer;
use regwatch_core::{ChangeRecord, SourceRecord};
use regwatch_feed::{ChangeProvider, FeedError};

// -- Generic In-Memory Store --------------------------------------------------

/// Thread-safe, cloneable in-memory key-value store keyed by record id.
///
/// All operations are synchronous (the RwLock is `parking_lot`, not
/// `tokio::sync`) because the lock is never held across `.await` points.
/// `parking_lot::RwLock` is non-poisonable — a panicking writer does not
/// permanently corrupt the store.
#[derive(Debug)]
pub struct Store<T: Clone + Send + Sync> {
    data: Arc<RwLock<HashMap<String, T>>>,
}

impl<T: Clone + Send + Sync> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T: Clone + Send + Sync> Store<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a record, returning the previous value if the key existed.
    pub fn insert(&self, id: impl Into<String>, value: T) -> Option<T> {
        self.data.write().insert(id.into(), value)
    }

    /// Retrieve a record by id.
    pub fn get(&self, id: &str) -> Option<T> {
        self.data.read().get(id).cloned()
    }

    /// List all records.
    pub fn list(&self) -> Vec<T> {
        self.data.read().values().cloned().collect()
    }

    /// Update a record in place. Returns the updated record, or `None` if
    /// the id is unknown.
    pub fn update(&self, id: &str, f: impl FnOnce(&mut T)) -> Option<T> {
        let mut guard = self.data.write();
        if let Some(entry) = guard.get_mut(id) {
            f(entry);
            Some(entry.clone())
        } else {
            None
        }
    }

    /// Remove a record by id.
    pub fn remove(&self, id: &str) -> Option<T> {
        self.data.write().remove(id)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone + Send + Sync> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

// -- Application State --------------------------------------------------------

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Origin allowed by the CORS layer (the dashboard), `*` for any.
    pub allowed_origin: String,
    /// Data directory holding the knowledge base and analysis cache.
    pub data_dir: PathBuf,
    /// How many upstream records to hydrate at startup.
    pub hydrate_limit: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            allowed_origin: "http://localhost:3000".to_string(),
            data_dir: PathBuf::from("data"),
            hydrate_limit: 50,
        }
    }
}

impl AppConfig {
    /// Build configuration from environment variables.
    ///
    /// Variables: `PORT`, `REGWATCH_ALLOWED_ORIGIN`, `REGWATCH_DATA_DIR`,
    /// `REGWATCH_HYDRATE_LIMIT` — each falling back to the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            config.port = port;
        }
        if let Ok(origin) = std::env::var("REGWATCH_ALLOWED_ORIGIN") {
            config.allowed_origin = origin;
        }
        if let Ok(dir) = std::env::var("REGWATCH_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(limit) = std::env::var("REGWATCH_HYDRATE_LIMIT")
            .ok()
            .and_then(|l| l.parse().ok())
        {
            config.hydrate_limit = limit;
        }
        config
    }
}

/// Shared application state accessible to all route handlers.
///
/// Clone-friendly via `Arc` internals in each [`Store`].
#[derive(Debug, Clone)]
pub struct AppState {
    /// Change records hydrated from the feed provider.
    pub changes: Store<ChangeRecord>,
    /// Source registry; mutated by the sources endpoints, never persisted.
    pub sources: Store<SourceRecord>,
    /// The analysis pipeline, when an LLM key is configured.
    pub analyzer: Option<Analyzer>,
    /// Which provider backend hydrated the stores (`static` / `remote`).
    pub provider_kind: &'static str,
    /// Application configuration.
    pub config: AppConfig,
}

impl AppState {
    /// Create an empty state with default configuration and no analyzer.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), None, "static")
    }

    /// Create a state with the given configuration and optional analyzer.
    pub fn with_config(
        config: AppConfig,
        analyzer: Option<Analyzer>,
        provider_kind: &'static str,
    ) -> Self {
        Self {
            changes: Store::new(),
            sources: Store::new(),
            analyzer,
            provider_kind,
            config,
        }
    }

    /// Hydrate the in-memory stores from the feed provider.
    ///
    /// Called once on startup. A feed failure is returned to the caller for
    /// logging but is not fatal — the API serves whatever was hydrated
    /// (possibly nothing) and the rest of the surface stays interactive.
    pub async fn hydrate_from_provider(
        &self,
        provider: &ChangeProvider,
    ) -> Result<(), FeedError> {
        for source in provider.sources() {
            self.sources.insert(source.id.as_str().to_owned(), source);
        }

        let page = provider.fetch_page(1, self.config.hydrate_limit).await?;
        let count = page.changes.len();
        for change in page.changes {
            self.changes.insert(change.id.as_str().to_owned(), change);
        }

        tracing::info!(
            provider = self.provider_kind,
            sources = self.sources.len(),
            changes = count,
            "hydrated in-memory stores from feed provider"
        );
        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
