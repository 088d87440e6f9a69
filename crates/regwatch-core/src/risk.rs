//! # Risk Level — Single Source of Truth
//!
//! Defines the ordinal severity classification assigned to every detected
//! regulatory change. This is the ONE definition used across the stack —
//! the feed scorer, the API, the analysis agent, and the CLI all match on
//! the same four variants, so a new severity tier forces every consumer to
//! handle it at compile time.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::ValidationError;

/// Ordinal severity of a detected regulatory change.
///
/// Ordering follows severity: `Low < Medium < High < Critical`. The derived
/// `Ord` makes threshold checks (`level >= RiskLevel::High`) read naturally.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Routine update with no compliance action expected.
    Low,
    /// Update likely to require a policy or documentation review.
    Medium,
    /// Update requiring remediation work on a deadline.
    High,
    /// Update with enforcement or penalty exposure; immediate attention.
    Critical,
}

impl RiskLevel {
    /// Returns all four risk levels in ascending severity order.
    pub fn all() -> &'static [RiskLevel] {
        &[Self::Low, Self::Medium, Self::High, Self::Critical]
    }

    /// Returns the lowercase string identifier for this level.
    ///
    /// This must match the serde serialization format — the API wire
    /// casing consumed by the dashboard.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Whether this level counts as an alert (high or critical).
    ///
    /// Drives the stats rollup and the auto-analysis policy: only alert
    /// levels are analyzed without an explicit user request.
    pub fn is_alert(&self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = ValidationError;

    /// Parse a risk level, ignoring case.
    ///
    /// The API serializes lowercase (`"critical"`) while the analysis
    /// service emits capitalized levels (`"Critical"`); both parse here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(ValidationError::UnknownRiskLevel(other.to_string())),
        }
    }
}
