//! Static fixture provider.
//!
//! Serves an embedded demo data set with the same pagination envelope as
//! the remote provider. Used when no feed URL is configured, and by tests
//! that need deterministic records.

use chrono::DateTime;

use regwatch_core::{
    ChangeFilter, ChangeId, ChangeRecord, ChangesPage, RiskLevel, SourceId, SourceRecord,
    SourceStatus,
};

use crate::error::FeedError;

/// Provider backed by the embedded fixture set.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    sources: Vec<SourceRecord>,
    changes: Vec<ChangeRecord>,
}

impl StaticProvider {
    /// Provider over the embedded demo fixtures.
    pub fn new() -> Self {
        Self {
            sources: fixture_sources(),
            changes: fixture_changes(),
        }
    }

    /// Provider over an explicit record set (test seam).
    pub fn with_records(sources: Vec<SourceRecord>, changes: Vec<ChangeRecord>) -> Self {
        Self { sources, changes }
    }

    /// The monitored sources in the fixture set.
    pub fn sources(&self) -> Vec<SourceRecord> {
        self.sources.clone()
    }

    /// Fetch one page of fixture changes, newest first.
    ///
    /// Async and fallible to stay interchangeable with the remote
    /// provider; the static backend itself cannot fail.
    pub async fn fetch_page(&self, page: u32, limit: u32) -> Result<ChangesPage, FeedError> {
        let sorted = ChangeFilter::all().apply(&self.changes);
        let limit = limit.max(1);
        let total = sorted.len() as u64;
        let total_pages = (sorted.len() as u32).div_ceil(limit);
        let start = (page.saturating_sub(1) as usize) * limit as usize;
        let changes = sorted
            .into_iter()
            .skip(start)
            .take(limit as usize)
            .collect();
        Ok(ChangesPage {
            changes,
            total,
            page,
            limit,
            total_pages,
        })
    }

    /// Look up a fixture change by id.
    pub async fn fetch_change(&self, id: &ChangeId) -> Result<Option<ChangeRecord>, FeedError> {
        Ok(self.changes.iter().find(|c| &c.id == id).cloned())
    }
}

impl Default for StaticProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn ts(raw: &str) -> DateTime<chrono::Utc> {
    raw.parse().expect("fixture timestamps are valid RFC 3339")
}

fn id<T: std::str::FromStr>(raw: &str) -> T
where
    T::Err: std::fmt::Debug,
{
    raw.parse().expect("fixture identifiers are valid")
}

/// Demo sources: the monitored Indian regulatory publication channels.
pub fn fixture_sources() -> Vec<SourceRecord> {
    vec![
        SourceRecord {
            id: id("src-001"),
            name: "DPDP Act Portal".to_string(),
            url: "https://www.meity.gov.in/dpdp-act".to_string(),
            category: "DPDP".to_string(),
            last_checked: Some(ts("2026-02-27T10:30:00Z")),
            last_changed: Some(ts("2026-02-25T14:20:00Z")),
            status: SourceStatus::Active,
            monitoring: true,
        },
        SourceRecord {
            id: id("src-002"),
            name: "RBI Master Directions".to_string(),
            url: "https://www.rbi.org.in/scripts/BS_ViewMasDirections.aspx".to_string(),
            category: "RBI".to_string(),
            last_checked: Some(ts("2026-02-27T10:30:00Z")),
            last_changed: Some(ts("2026-02-26T09:15:00Z")),
            status: SourceStatus::Active,
            monitoring: true,
        },
        SourceRecord {
            id: id("src-003"),
            name: "SEBI Circulars".to_string(),
            url: "https://www.sebi.gov.in/sebiweb/home/list/1/7/0/0/Circulars".to_string(),
            category: "SEBI".to_string(),
            last_checked: Some(ts("2026-02-27T10:30:00Z")),
            last_changed: Some(ts("2026-02-24T16:45:00Z")),
            status: SourceStatus::Active,
            monitoring: true,
        },
        SourceRecord {
            id: id("src-004"),
            name: "IT Act Amendments".to_string(),
            url: "https://www.meity.gov.in/it-act".to_string(),
            category: "IT Act".to_string(),
            last_checked: Some(ts("2026-02-27T08:00:00Z")),
            last_changed: Some(ts("2026-02-15T08:00:00Z")),
            status: SourceStatus::Error,
            monitoring: true,
        },
        SourceRecord {
            id: id("src-005"),
            name: "TRAI Regulations".to_string(),
            url: "https://www.trai.gov.in/release-publication/regulations".to_string(),
            category: "TRAI".to_string(),
            last_checked: Some(ts("2026-02-26T22:00:00Z")),
            last_changed: Some(ts("2026-02-10T10:00:00Z")),
            status: SourceStatus::Inactive,
            monitoring: false,
        },
    ]
}

/// Demo changes: a spread of risk levels across the fixture sources.
pub fn fixture_changes() -> Vec<ChangeRecord> {
    vec![
        ChangeRecord {
            id: id("chg-001"),
            source_id: id("src-002"),
            source_name: "RBI Master Directions".to_string(),
            change_summary: "Updated KYC norms for digital lending platforms with new identity \
                             verification requirements effective April 1, 2026."
                .to_string(),
            risk_level: RiskLevel::Critical,
            detected_at: ts("2026-02-26T09:15:00Z"),
            affected_sector: "Banking, Fintech, NBFCs, Digital Lending".to_string(),
            ai_summary: "The Reserve Bank of India has amended the Master Direction on KYC \
                         guidelines for digital lending platforms. Video-based customer \
                         identification is now mandatory for all loan amounts exceeding INR \
                         50,000, down from INR 2,00,000, and high-risk customers must be \
                         re-verified every 2 years."
                .to_string(),
            recommended_action: "1. Review V-CIP integration thresholds in lending workflows.\n\
                                 2. Implement periodic re-verification scheduling.\n\
                                 3. Conduct a gap analysis before the April 1, 2026 deadline."
                .to_string(),
            raw_diff: "- Section 38(1): V-CIP required for loan amounts exceeding INR 2,00,000\n\
                       + Section 38(1): V-CIP required for loan amounts exceeding INR 50,000\n\
                       + Section 42B (New): Quarterly compliance reporting to RBI"
                .to_string(),
            compliance_checklist: vec![
                "Update V-CIP threshold from INR 2,00,000 to INR 50,000".to_string(),
                "Implement 2-year re-verification cycle for high-risk customers".to_string(),
                "Configure quarterly compliance reporting module".to_string(),
            ],
            link: None,
            content: None,
            matched_keywords: None,
        },
        ChangeRecord {
            id: id("chg-002"),
            source_id: id("src-001"),
            source_name: "DPDP Act Portal".to_string(),
            change_summary: "New data localization requirements published for cross-border data \
                             transfers under DPDP Act Section 16."
                .to_string(),
            risk_level: RiskLevel::High,
            detected_at: ts("2026-02-25T14:20:00Z"),
            affected_sector: "Technology, BPO, Financial Services, Healthcare".to_string(),
            ai_summary: "Rules under Section 16 of the DPDP Act specify a whitelist of approved \
                         countries for data transfer and mandate data impact assessments for \
                         transfers to non-whitelisted jurisdictions."
                .to_string(),
            recommended_action: "1. Audit current cross-border data flows.\n\
                                 2. Verify destinations against the whitelist.\n\
                                 3. Evaluate the DPO appointment requirement."
                .to_string(),
            raw_diff: "+ Rule 16.1: Cross-border transfers permitted only to whitelisted \
                       countries\n+ Rule 16.3: DPO appointment required for entities processing \
                       >10,000 records"
                .to_string(),
            compliance_checklist: vec![
                "Complete cross-border data flow audit".to_string(),
                "Implement data impact assessment process".to_string(),
            ],
            link: None,
            content: None,
            matched_keywords: None,
        },
        ChangeRecord {
            id: id("chg-003"),
            source_id: id("src-003"),
            source_name: "SEBI Circulars".to_string(),
            change_summary: "SEBI introduces enhanced cybersecurity framework for market \
                             infrastructure institutions and intermediaries."
                .to_string(),
            risk_level: RiskLevel::High,
            detected_at: ts("2026-02-24T16:45:00Z"),
            affected_sector: "Capital Markets, Stock Brokers, Depository Participants".to_string(),
            ai_summary: "SEBI mandates SOC 2 Type II compliance, quarterly penetration testing, \
                         and a 6-hour incident response window for market infrastructure \
                         institutions."
                .to_string(),
            recommended_action: "1. Initiate SOC 2 Type II audit preparation.\n\
                                 2. Move penetration testing to a quarterly schedule."
                .to_string(),
            raw_diff: "+ Clause 4.2: Penetration testing required quarterly (previously \
                       annually)\n+ Clause 5.1: Incident response time reduced to 6 hours"
                .to_string(),
            compliance_checklist: vec![
                "Initiate SOC 2 Type II audit".to_string(),
                "Reduce incident response time to 6 hours".to_string(),
            ],
            link: None,
            content: None,
            matched_keywords: None,
        },
        ChangeRecord {
            id: id("chg-004"),
            source_id: id("src-004"),
            source_name: "IT Act Amendments".to_string(),
            change_summary: "Minor updates to intermediary due-diligence guidelines - grievance \
                             officer contact publication requirements clarified."
                .to_string(),
            risk_level: RiskLevel::Low,
            detected_at: ts("2026-02-15T08:00:00Z"),
            affected_sector: "Technology".to_string(),
            ai_summary: "A clarification to the intermediary guidelines on where grievance \
                         officer contact details must be published. No new obligations."
                .to_string(),
            recommended_action: "1. Verify grievance officer details are published on the \
                                 contact page."
                .to_string(),
            raw_diff: "- Contact details in terms of service\n+ Contact details on a dedicated, \
                       linked contact page"
                .to_string(),
            compliance_checklist: vec!["Review grievance officer page placement".to_string()],
            link: None,
            content: None,
            matched_keywords: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_page_is_newest_first() {
        let provider = StaticProvider::new();
        let page = provider.fetch_page(1, 10).await.unwrap();
        assert_eq!(page.total, 4);
        assert_eq!(page.total_pages, 1);
        let ids: Vec<&str> = page.changes.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["chg-001", "chg-002", "chg-003", "chg-004"]);
    }

    #[tokio::test]
    async fn pagination_slices_and_reports_pages() {
        let provider = StaticProvider::new();
        let page = provider.fetch_page(2, 3).await.unwrap();
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.changes.len(), 1);
        assert_eq!(page.changes[0].id.as_str(), "chg-004");
    }

    #[tokio::test]
    async fn out_of_range_page_is_empty_not_an_error() {
        let provider = StaticProvider::new();
        let page = provider.fetch_page(9, 10).await.unwrap();
        assert!(page.changes.is_empty());
        assert_eq!(page.total, 4);
    }

    #[tokio::test]
    async fn fetch_change_finds_by_id() {
        let provider = StaticProvider::new();
        let found = provider
            .fetch_change(&"chg-002".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(found.unwrap().source_name, "DPDP Act Portal");
        let missing = provider
            .fetch_change(&"chg-404".parse().unwrap())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn fixture_ids_are_unique() {
        let changes = fixture_changes();
        let mut seen = std::collections::HashSet::new();
        for c in &changes {
            assert!(seen.insert(c.id.clone()), "duplicate change id: {}", c.id);
        }
        let sources = fixture_sources();
        let mut seen = std::collections::HashSet::new();
        for s in &sources {
            assert!(seen.insert(s.id.clone()), "duplicate source id: {}", s.id);
        }
    }

    #[test]
    fn every_change_references_a_fixture_source() {
        let sources = fixture_sources();
        for c in fixture_changes() {
            assert!(
                sources.iter().any(|s| s.id == c.source_id),
                "change {} references unknown source {}",
                c.id,
                c.source_id
            );
        }
    }
}
