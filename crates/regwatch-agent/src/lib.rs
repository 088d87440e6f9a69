//! # regwatch-agent — Retrieval-Augmented Compliance Analysis
//!
//! Maps a regulatory update onto the company's compliance obligations and
//! produces a structured assessment: applicability, risk level, actionable
//! tasks with deadlines, and reasoning steps.
//!
//! ## Pipeline
//!
//! ```text
//! update text → retrieve obligation → build prompt → LLM → parse result
//! ```
//!
//! Retrieval is deterministic keyword scoring over the knowledge base
//! ([`retrieval`]); only the final assessment step calls the model. The
//! [`cache`] keeps one analysis per change id so re-rendering a feed does
//! not re-run the expensive step, and the auto-analysis policy only spends
//! model calls on high and critical changes.

pub mod cache;
pub mod error;
pub mod knowledge;
pub mod llm;
pub mod prompt;
pub mod retrieval;

pub use cache::AnalysisCache;
pub use error::AgentError;
pub use knowledge::{KnowledgeBase, Obligation};
pub use llm::{LlmClient, LlmConfig};

use std::path::Path;

use regwatch_core::{AnalysisResult, ChangeRecord, RetrievedObligation};

/// File name of the persisted analysis cache.
pub const ANALYSIS_CACHE_FILE: &str = "analysis_cache.json";

/// The analysis pipeline: knowledge base, model client, and cache.
#[derive(Debug, Clone)]
pub struct Analyzer {
    knowledge: KnowledgeBase,
    llm: LlmClient,
    cache: AnalysisCache,
}

impl Analyzer {
    /// Assemble an analyzer from its parts.
    pub fn new(knowledge: KnowledgeBase, llm: LlmClient, cache: AnalysisCache) -> Self {
        Self {
            knowledge,
            llm,
            cache,
        }
    }

    /// Build an analyzer from the environment and the data directory.
    ///
    /// Returns `Ok(None)` when no LLM API key is configured — the rest of
    /// the stack runs without analysis rather than failing startup.
    pub fn from_env(data_dir: &Path) -> Result<Option<Self>, AgentError> {
        let Some(llm_config) = LlmConfig::from_env()? else {
            tracing::warn!("no LLM API key configured — analysis disabled");
            return Ok(None);
        };
        let knowledge = KnowledgeBase::load(data_dir)?;
        let llm = LlmClient::new(llm_config)?;
        let cache = AnalysisCache::load(data_dir.join(ANALYSIS_CACHE_FILE))?;
        Ok(Some(Self::new(knowledge, llm, cache)))
    }

    /// The analysis cache.
    pub fn cache(&self) -> &AnalysisCache {
        &self.cache
    }

    /// Analyze a regulatory update.
    ///
    /// Fails fast on empty or whitespace-only input without touching the
    /// network. On success the retrieved obligation is attached to the
    /// result so consumers can show what the analysis was grounded on.
    pub async fn analyze(&self, update_text: &str) -> Result<AnalysisResult, AgentError> {
        let update_text = update_text.trim();
        if update_text.is_empty() {
            return Err(AgentError::EmptyUpdateText);
        }

        let obligation = retrieval::retrieve_relevant_obligation(update_text, &self.knowledge)
            .ok_or(AgentError::EmptyKnowledgeBase)?;
        tracing::debug!(obligation = %obligation.id, "retrieved obligation");

        let prompt = prompt::build_prompt(&self.knowledge.profile, update_text, obligation);
        let raw = self.llm.generate(&prompt).await?;
        let text = llm::strip_code_fences(&raw);

        let mut result: AnalysisResult =
            serde_json::from_str(text).map_err(|source| AgentError::ResultParse {
                source,
                raw: text.to_string(),
            })?;

        result.retrieved_obligation = Some(RetrievedObligation {
            id: obligation.id.clone(),
            title: obligation.title.clone(),
            description: obligation.description.clone(),
        });
        Ok(result)
    }

    /// Whether a change qualifies for unprompted analysis.
    ///
    /// Only alert-level changes are analyzed automatically; everything else
    /// waits for an explicit request.
    pub fn should_analyze(change: &ChangeRecord) -> bool {
        change.risk_level.is_alert()
    }

    /// Analyze a change if appropriate, consulting the cache first.
    ///
    /// Returns `Ok(None)` for changes below the auto-analysis threshold.
    pub async fn auto_analyze(
        &self,
        change: &ChangeRecord,
    ) -> Result<Option<AnalysisResult>, AgentError> {
        if let Some(cached) = self.cache.get(change.id.as_str()) {
            return Ok(Some(cached));
        }
        if !Self::should_analyze(change) {
            return Ok(None);
        }

        let result = self.analyze(&change.analysis_text()).await?;
        self.cache.insert(change.id.as_str(), result.clone())?;
        tracing::info!(
            change = %change.id,
            risk = %result.risk_level,
            "auto-analyzed change"
        );
        Ok(Some(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regwatch_core::{ChangeId, RiskLevel, SourceId};

    fn change(risk: RiskLevel) -> ChangeRecord {
        ChangeRecord {
            id: ChangeId::new("chg-001").unwrap(),
            source_id: SourceId::new("src-001").unwrap(),
            source_name: "s".to_string(),
            change_summary: "c".to_string(),
            risk_level: risk,
            detected_at: "2026-02-25T00:00:00Z".parse().unwrap(),
            affected_sector: String::new(),
            ai_summary: String::new(),
            recommended_action: String::new(),
            raw_diff: String::new(),
            compliance_checklist: vec![],
            link: None,
            content: None,
            matched_keywords: None,
        }
    }

    #[test]
    fn only_alert_levels_qualify_for_auto_analysis() {
        assert!(!Analyzer::should_analyze(&change(RiskLevel::Low)));
        assert!(!Analyzer::should_analyze(&change(RiskLevel::Medium)));
        assert!(Analyzer::should_analyze(&change(RiskLevel::High)));
        assert!(Analyzer::should_analyze(&change(RiskLevel::Critical)));
    }
}
