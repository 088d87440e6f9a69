//! # Change Filter Engine
//!
//! Pure filtering and ordering over change collections. Given the current
//! record set and the user-selected predicates (risk level, source,
//! free-text query), produces the visible subset in a deterministic order:
//! newest first, ties in original relative order.
//!
//! The same engine runs server-side (query parameters on `GET /api/changes`)
//! and in the CLI. It is a pure function of its inputs — no error
//! conditions, no side effects, and applying the same filter twice yields
//! the same result.

use serde::{Deserialize, Serialize};

use crate::change::ChangeRecord;
use crate::identity::SourceId;
use crate::risk::RiskLevel;

/// Predicates selecting the visible subset of a change collection.
///
/// `None` means "all" for the risk and source predicates; an empty query
/// disables the text predicate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeFilter {
    /// Retain only changes at exactly this risk level.
    pub risk: Option<RiskLevel>,
    /// Retain only changes from this source.
    pub source: Option<SourceId>,
    /// Case-insensitive substring matched against the change summary and
    /// the source name.
    pub query: String,
}

impl ChangeFilter {
    /// The all-pass filter: every record retained.
    pub fn all() -> Self {
        Self::default()
    }

    /// Whether this filter retains the given record.
    ///
    /// A record is retained iff every active predicate matches:
    /// risk equality, source equality, and case-insensitive substring
    /// containment of the query in the summary or the source name.
    pub fn matches(&self, change: &ChangeRecord) -> bool {
        if let Some(risk) = self.risk {
            if change.risk_level != risk {
                return false;
            }
        }
        if let Some(source) = &self.source {
            if &change.source_id != source {
                return false;
            }
        }
        if !self.query.is_empty() {
            let needle = self.query.to_lowercase();
            let in_summary = change.change_summary.to_lowercase().contains(&needle);
            let in_source = change.source_name.to_lowercase().contains(&needle);
            if !in_summary && !in_source {
                return false;
            }
        }
        true
    }

    /// Produce the retained subsequence, sorted by detection timestamp
    /// descending. The sort is stable: records with equal timestamps keep
    /// their original relative order.
    pub fn apply(&self, changes: &[ChangeRecord]) -> Vec<ChangeRecord> {
        let mut retained: Vec<ChangeRecord> =
            changes.iter().filter(|c| self.matches(c)).cloned().collect();
        retained.sort_by(|a, b| b.detected_at.cmp(&a.detected_at));
        retained
    }
}
