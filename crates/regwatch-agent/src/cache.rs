//! Analysis result cache.
//!
//! Keyed by change id, held in memory, optionally persisted to a JSON file
//! in the data directory so restarting the service does not re-analyze the
//! same publications (LLM calls are the expensive step in the pipeline).

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use regwatch_core::AnalysisResult;

use crate::error::AgentError;

/// A cached analysis with provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedAnalysis {
    /// The analysis result.
    pub analysis: AnalysisResult,
    /// When the analysis was cached.
    pub cached_at: DateTime<Utc>,
    /// The change this analysis belongs to.
    pub change_id: String,
}

/// Thread-safe analysis cache with optional file persistence.
#[derive(Debug, Clone)]
pub struct AnalysisCache {
    entries: Arc<RwLock<HashMap<String, CachedAnalysis>>>,
    path: Option<PathBuf>,
}

impl AnalysisCache {
    /// An in-memory-only cache.
    pub fn in_memory() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            path: None,
        }
    }

    /// A file-backed cache. A missing file starts the cache empty; a
    /// corrupt file is an error rather than a silent wipe.
    pub fn load(path: PathBuf) -> Result<Self, AgentError> {
        let entries = if path.exists() {
            let raw = std::fs::read_to_string(&path).map_err(|source| AgentError::FileRead {
                path: path.clone(),
                source,
            })?;
            let entries: HashMap<String, CachedAnalysis> =
                serde_json::from_str(&raw).map_err(|source| AgentError::FileParse {
                    path: path.clone(),
                    source,
                })?;
            tracing::info!(cached = entries.len(), "loaded analysis cache");
            entries
        } else {
            tracing::debug!(path = %path.display(), "no analysis cache file — starting fresh");
            HashMap::new()
        };

        Ok(Self {
            entries: Arc::new(RwLock::new(entries)),
            path: Some(path),
        })
    }

    /// Look up a cached analysis by change id.
    pub fn get(&self, change_id: &str) -> Option<AnalysisResult> {
        self.entries
            .read()
            .get(change_id)
            .map(|c| c.analysis.clone())
    }

    /// Insert an analysis, persisting the cache when file-backed.
    pub fn insert(&self, change_id: &str, analysis: AnalysisResult) -> Result<(), AgentError> {
        {
            let mut entries = self.entries.write();
            entries.insert(
                change_id.to_string(),
                CachedAnalysis {
                    analysis,
                    cached_at: Utc::now(),
                    change_id: change_id.to_string(),
                },
            );
        }
        self.persist()
    }

    /// Remove every entry, deleting the backing file when present.
    pub fn clear(&self) -> Result<(), AgentError> {
        self.entries.write().clear();
        if let Some(path) = &self.path {
            if path.exists() {
                std::fs::remove_file(path).map_err(|source| AgentError::FileWrite {
                    path: path.clone(),
                    source,
                })?;
            }
        }
        Ok(())
    }

    /// Number of cached analyses.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn persist(&self) -> Result<(), AgentError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let entries = self.entries.read();
        let raw = serde_json::to_string_pretty(&*entries).map_err(|source| {
            AgentError::FileParse {
                path: path.clone(),
                source,
            }
        })?;
        std::fs::write(path, raw).map_err(|source| AgentError::FileWrite {
            path: path.clone(),
            source,
        })
    }
}
