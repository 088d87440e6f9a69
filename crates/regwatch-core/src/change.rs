//! Change records and the paginated envelope served by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::identity::{ChangeId, SourceId};
use crate::risk::RiskLevel;

/// A detected regulatory change, annotated with risk and remediation
/// metadata.
///
/// Records are immutable from the consumer's perspective: the feed produces
/// them, the API serves them, and a re-fetch replaces them wholesale.
/// Serialized in the camelCase wire format the dashboard consumes. Fields
/// the upstream feed cannot populate (`ai_summary`, `recommended_action`,
/// `raw_diff`, `compliance_checklist`) default to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
    /// Unique identifier within a result set.
    pub id: ChangeId,
    /// Identifier of the originating source.
    pub source_id: SourceId,
    /// Display name of the originating source.
    pub source_name: String,
    /// Free-text summary of the change (upstream title).
    pub change_summary: String,
    /// Ordinal severity classification.
    pub risk_level: RiskLevel,
    /// When the change was detected.
    pub detected_at: DateTime<Utc>,
    /// Comma-separated list of affected sectors.
    #[serde(default)]
    pub affected_sector: String,
    /// AI-generated impact summary.
    #[serde(default)]
    pub ai_summary: String,
    /// Recommended remediation actions.
    #[serde(default)]
    pub recommended_action: String,
    /// Textual diff of the underlying document change.
    #[serde(default)]
    pub raw_diff: String,
    /// Ordered checklist of compliance follow-ups.
    #[serde(default)]
    pub compliance_checklist: Vec<String>,
    /// Link to the upstream publication, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Plain-text excerpt of the upstream document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Watch keywords that matched during ingestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_keywords: Option<Vec<String>>,
}

impl ChangeRecord {
    /// Combined text used for analysis: summary plus content excerpt.
    pub fn analysis_text(&self) -> String {
        match &self.content {
            Some(content) if !content.is_empty() => {
                format!("{}\n\n{}", self.change_summary, content)
            }
            _ => self.change_summary.clone(),
        }
    }
}

/// Paginated envelope for `GET /api/changes`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangesPage {
    /// The page of change records, newest first.
    pub changes: Vec<ChangeRecord>,
    /// Total records available upstream (across all pages).
    pub total: u64,
    /// 1-based page number.
    pub page: u32,
    /// Page size requested.
    pub limit: u32,
    /// Total number of pages at this page size.
    pub total_pages: u32,
}

impl ChangesPage {
    /// An empty page — valid, and distinguishable from "loading" by the
    /// presenting layer because it carries pagination metadata.
    pub fn empty(page: u32, limit: u32) -> Self {
        Self {
            changes: Vec::new(),
            total: 0,
            page,
            limit,
            total_pages: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ChangeRecord {
        ChangeRecord {
            id: ChangeId::new("chg-001").unwrap(),
            source_id: SourceId::new("src-002").unwrap(),
            source_name: "RBI Master Directions".to_string(),
            change_summary: "Updated KYC norms for digital lending platforms".to_string(),
            risk_level: RiskLevel::Critical,
            detected_at: "2026-02-26T09:15:00Z".parse().unwrap(),
            affected_sector: "Banking, Fintech".to_string(),
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
    fn serializes_camel_case() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["sourceId"], "src-002");
        assert_eq!(json["riskLevel"], "critical");
        assert_eq!(json["detectedAt"], "2026-02-26T09:15:00Z");
        assert!(json.get("link").is_none(), "absent link must be omitted");
    }

    #[test]
    fn deserializes_wire_shape_with_defaults() {
        let json = serde_json::json!({
            "id": "meity-4821",
            "sourceId": "meity",
            "sourceName": "MeitY Press Release",
            "changeSummary": "Draft rules on breach notification timelines",
            "riskLevel": "high",
            "detectedAt": "2026-02-20T11:30:00Z",
            "link": "https://example.gov/press/4821",
            "matchedKeywords": ["breach", "notification"]
        });
        let record: ChangeRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.risk_level, RiskLevel::High);
        assert!(record.ai_summary.is_empty());
        assert!(record.compliance_checklist.is_empty());
        assert_eq!(
            record.matched_keywords.as_deref(),
            Some(&["breach".to_string(), "notification".to_string()][..])
        );
    }

    #[test]
    fn analysis_text_appends_content() {
        let mut r = record();
        assert_eq!(r.analysis_text(), r.change_summary);
        r.content = Some("Full excerpt.".to_string());
        assert!(r.analysis_text().ends_with("Full excerpt."));
        assert!(r.analysis_text().starts_with(&r.change_summary));
    }

    #[test]
    fn empty_page_has_metadata() {
        let page = ChangesPage::empty(3, 25);
        assert!(page.changes.is_empty());
        assert_eq!(page.page, 3);
        assert_eq!(page.limit, 25);
        assert_eq!(page.total_pages, 0);
    }
}
