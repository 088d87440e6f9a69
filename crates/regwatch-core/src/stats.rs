//! Dashboard statistics rollup.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::change::ChangeRecord;
use crate::risk::RiskLevel;
use crate::source::SourceRecord;

/// Aggregate monitoring statistics. Computed from the current record sets,
/// never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Sources with monitoring switched on.
    pub sources_monitored: usize,
    /// All registered sources.
    pub total_sources: usize,
    /// Changes detected in the current window.
    pub changes_this_month: usize,
    /// Changes at high or critical risk.
    pub high_risk_alerts: usize,
    /// Changes at critical risk.
    pub critical_alerts: usize,
}

impl Stats {
    /// Compute the rollup from the current sources and changes.
    pub fn compute(sources: &[SourceRecord], changes: &[ChangeRecord]) -> Self {
        Self {
            sources_monitored: sources.iter().filter(|s| s.monitoring).count(),
            total_sources: sources.len(),
            changes_this_month: changes.len(),
            high_risk_alerts: changes.iter().filter(|c| c.risk_level.is_alert()).count(),
            critical_alerts: changes
                .iter()
                .filter(|c| c.risk_level == RiskLevel::Critical)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{ChangeId, SourceId};

    fn change(id: &str, risk: RiskLevel) -> ChangeRecord {
        ChangeRecord {
            id: ChangeId::new(id).unwrap(),
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
    fn counts_alerts_and_sources() {
        let mut off = SourceRecord::new("a", "u", "c");
        off.set_monitoring(false);
        let sources = vec![SourceRecord::new("b", "u", "c"), off];
        let changes = vec![
            change("1", RiskLevel::Low),
            change("2", RiskLevel::High),
            change("3", RiskLevel::Critical),
            change("4", RiskLevel::Critical),
        ];
        let stats = Stats::compute(&sources, &changes);
        assert_eq!(stats.sources_monitored, 1);
        assert_eq!(stats.total_sources, 2);
        assert_eq!(stats.changes_this_month, 4);
        assert_eq!(stats.high_risk_alerts, 3);
        assert_eq!(stats.critical_alerts, 2);
    }

    #[test]
    fn empty_inputs_give_zero_stats() {
        assert_eq!(Stats::compute(&[], &[]), Stats::default());
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(Stats::default()).unwrap();
        assert!(json.get("sourcesMonitored").is_some());
        assert!(json.get("highRiskAlerts").is_some());
    }
}
