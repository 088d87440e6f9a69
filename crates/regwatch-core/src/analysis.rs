//! Analysis result shape returned by the compliance analysis pipeline.
//!
//! The shape is accepted as the analysis service returns it: unknown fields
//! are ignored and optional fields default, so a prompt-schema evolution on
//! the service side cannot break deserialization. The one exception is
//! `risk_level`, which parses case-insensitively into [`RiskLevel`] — the
//! service capitalizes levels (`"High"`) while the rest of the wire format
//! is lowercase.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::risk::RiskLevel;

/// An actionable follow-up task produced by the analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisTask {
    /// Task description.
    pub title: String,
    /// Priority label as returned by the service ("Low" | "Medium" | "High").
    #[serde(default)]
    pub priority: String,
    /// Deadline in days from detection.
    #[serde(default)]
    pub deadline_days: u32,
}

/// The obligation the retrieval step matched the update against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RetrievedObligation {
    /// Obligation identifier (e.g. "DPDP-004").
    pub id: String,
    /// Obligation title.
    #[serde(default)]
    pub title: String,
    /// Obligation description.
    #[serde(default)]
    pub description: String,
}

/// Structured result of analyzing a regulatory update against the company's
/// compliance obligations.
///
/// Created per analysis request and discarded on reset — never persisted by
/// consumers (the analysis cache is the pipeline's own concern).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResult {
    /// Whether the update applies to the company at all.
    pub applicable: bool,
    /// Assessed severity. Parses both `"critical"` and `"Critical"`.
    #[serde(deserialize_with = "risk_level_any_case")]
    pub risk_level: RiskLevel,
    /// Identifier of the affected obligation.
    #[serde(default)]
    pub affected_obligation_id: String,
    /// Brief summary of the impact.
    #[serde(default)]
    pub summary: String,
    /// Ordered list of actionable tasks.
    #[serde(default)]
    pub tasks: Vec<AnalysisTask>,
    /// Ordered reasoning steps behind the assessment.
    #[serde(default)]
    pub reasoning_steps: Vec<String>,
    /// The obligation retrieved for this update, attached by the pipeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrieved_obligation: Option<RetrievedObligation>,
}

/// Deserialize a risk level from either wire casing.
fn risk_level_any_case<'de, D>(deserializer: D) -> Result<RiskLevel, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}
