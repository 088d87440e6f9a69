//! Remote feed provider for WordPress-style documents APIs.
//!
//! Calls `GET {base}/cms/wp-json/document/documents` and converts the
//! returned posts into [`ChangeRecord`]s: publications with short titles
//! are dropped, HTML is stripped from excerpts, watch keywords gate
//! relevance, and match density drives the risk score.

use std::sync::OnceLock;
use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use serde::Deserialize;

use regwatch_core::{ChangeId, ChangeRecord, ChangesPage, SourceId, SourceRecord, SourceStatus};

use crate::config::FeedConfig;
use crate::error::{ConfigError, FeedError};
use crate::relevance;

/// Path of the documents listing endpoint, relative to the feed base URL.
const DOCUMENTS_PATH: &str = "cms/wp-json/document/documents";

/// Upstream rejects default reqwest user agents; present a browser string.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";

/// Maximum length of the content excerpt carried on a change record.
const EXCERPT_CHARS: usize = 500;

/// Minimum title length for a publication to be processed at all.
const MIN_TITLE_CHARS: usize = 20;

/// How many pages [`RemoteProvider::fetch_change`] scans for an id.
const LOOKUP_PAGES: u32 = 3;

/// Raw post shape returned by the upstream documents API.
///
/// Every field defaults — the upstream CMS adds and drops fields without
/// notice, and a malformed post must not poison the whole page.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPost {
    #[serde(rename = "ID", default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub post_title: String,
    #[serde(default)]
    pub post_date: String,
    #[serde(default)]
    pub post_slug: String,
    #[serde(default)]
    pub guid: String,
    #[serde(default)]
    pub post_excerpt: String,
    #[serde(default)]
    pub post_content: String,
}

/// Paginated listing envelope of the upstream documents API.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentsResponse {
    #[serde(default)]
    pub posts: Vec<RawPost>,
    #[serde(default)]
    pub total_items: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub current_page: u32,
}

/// Live provider over the upstream documents API.
#[derive(Debug, Clone)]
pub struct RemoteProvider {
    http: reqwest::Client,
    config: FeedConfig,
    source_id: SourceId,
}

impl RemoteProvider {
    /// Build a provider from configuration.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let source_id = SourceId::new(&config.source_id)
            .map_err(|e| ConfigError::InvalidSourceId(e.to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ConfigError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            config,
            source_id,
        })
    }

    /// The configuration this provider was built from.
    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Descriptor of the upstream feed as a monitored source.
    pub fn source(&self) -> SourceRecord {
        SourceRecord {
            id: self.source_id.clone(),
            name: self.config.source_name.clone(),
            url: self.config.base_url.to_string(),
            category: "Press Release".to_string(),
            last_checked: None,
            last_changed: None,
            status: SourceStatus::Active,
            monitoring: true,
        }
    }

    /// Fetch one page of relevant changes from the upstream feed.
    ///
    /// `total`/`total_pages` report the upstream listing size, not the
    /// relevant subset — the upstream paginates before relevance filtering.
    pub async fn fetch_page(&self, page: u32, limit: u32) -> Result<ChangesPage, FeedError> {
        let listing = self.fetch_documents(page, limit).await?;

        let changes: Vec<ChangeRecord> = listing
            .posts
            .iter()
            .filter_map(|post| self.process_post(post))
            .collect();

        tracing::debug!(
            page,
            fetched = listing.posts.len(),
            relevant = changes.len(),
            "processed upstream documents page"
        );

        Ok(ChangesPage {
            changes,
            total: listing.total_items,
            page,
            limit,
            total_pages: listing.total_pages,
        })
    }

    /// Look up a single change by id, scanning the most recent pages.
    pub async fn fetch_change(&self, id: &ChangeId) -> Result<Option<ChangeRecord>, FeedError> {
        for page in 1..=LOOKUP_PAGES {
            let listing = self.fetch_documents(page, 10).await?;
            for post in &listing.posts {
                if let Some(record) = self.process_post(post) {
                    if &record.id == id {
                        return Ok(Some(record));
                    }
                }
            }
        }
        Ok(None)
    }

    async fn fetch_documents(&self, page: u32, limit: u32) -> Result<DocumentsResponse, FeedError> {
        let endpoint = format!("GET /{DOCUMENTS_PATH}");
        let url = format!(
            "{}/{DOCUMENTS_PATH}",
            self.config.base_url.as_str().trim_end_matches('/')
        );

        let resp = self
            .http
            .get(&url)
            .query(&[
                ("type", "Press Release"),
                ("limit", &limit.to_string()),
                ("page", &page.to_string()),
            ])
            .send()
            .await
            .map_err(|e| FeedError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(FeedError::Api {
                endpoint,
                status,
                body,
            });
        }

        resp.json().await.map_err(|e| FeedError::Deserialization {
            endpoint,
            source: e,
        })
    }

    /// Convert a raw post into a change record, or `None` when the post is
    /// malformed or below the relevance threshold.
    fn process_post(&self, post: &RawPost) -> Option<ChangeRecord> {
        let title = post.post_title.trim();
        if title.chars().count() < MIN_TITLE_CHARS {
            return None;
        }

        let id = post_identifier(post)?;
        let id = ChangeId::new(id).ok()?;

        let content = truncate_chars(strip_html(&post.post_content_or_excerpt()), EXCERPT_CHARS);

        let matched = relevance::matched_keywords(title, &content);
        if !relevance::is_relevant(&matched) {
            return None;
        }
        let risk_level = relevance::score_risk(&matched, title, &content);

        Some(ChangeRecord {
            id,
            source_id: self.source_id.clone(),
            source_name: self.config.source_name.clone(),
            change_summary: title.to_string(),
            risk_level,
            detected_at: parse_post_date(&post.post_date),
            affected_sector: self.config.affected_sector.clone(),
            ai_summary: String::new(),
            recommended_action: String::new(),
            raw_diff: String::new(),
            compliance_checklist: vec![],
            link: Some(self.post_link(post)),
            content: (!content.is_empty()).then_some(content),
            matched_keywords: Some(matched),
        })
    }

    fn post_link(&self, post: &RawPost) -> String {
        if post.post_slug.is_empty() {
            post.guid.clone()
        } else {
            format!(
                "{}/documents/press-release/{}",
                self.config.base_url.as_str().trim_end_matches('/'),
                post.post_slug
            )
        }
    }
}

impl RawPost {
    fn post_content_or_excerpt(&self) -> String {
        if self.post_excerpt.is_empty() {
            self.post_content.clone()
        } else {
            self.post_excerpt.clone()
        }
    }
}

/// Extract a usable identifier from a post: the numeric/string `ID` field,
/// falling back to the slug.
fn post_identifier(post: &RawPost) -> Option<String> {
    match &post.id {
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ if !post.post_slug.is_empty() => Some(post.post_slug.clone()),
        _ => None,
    }
}

/// Parse the upstream `post_date` (`2026-01-21 13:02:04`, naive, assumed
/// UTC). Unparsable dates fall back to the Unix epoch so the detection
/// ordering stays total.
fn parse_post_date(raw: &str) -> DateTime<Utc> {
    NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Remove HTML tags and collapse surrounding whitespace.
fn strip_html(raw: &str) -> String {
    static TAG: OnceLock<Regex> = OnceLock::new();
    let tag = TAG.get_or_init(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));
    tag.replace_all(raw, "").trim().to_string()
}

/// Truncate to at most `max` characters on a char boundary.
fn truncate_chars(s: String, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regwatch_core::RiskLevel;
    use url::Url;

    fn provider() -> RemoteProvider {
        RemoteProvider::new(FeedConfig::new(
            Url::parse("https://www.meity.gov.in").unwrap(),
        ))
        .unwrap()
    }

    fn post(title: &str, content: &str) -> RawPost {
        RawPost {
            id: Some(serde_json::json!(4821)),
            post_title: title.to_string(),
            post_date: "2026-01-21 13:02:04".to_string(),
            post_slug: "sample-release".to_string(),
            guid: "https://www.meity.gov.in/?p=4821".to_string(),
            post_excerpt: content.to_string(),
            post_content: String::new(),
        }
    }

    #[test]
    fn processes_relevant_post() {
        let record = provider()
            .process_post(&post(
                "Advisory on personal data breach reporting timelines",
                "<p>Data fiduciaries must report a <b>breach</b> within 72 hours.</p>",
            ))
            .expect("relevant post");
        assert_eq!(record.id.as_str(), "4821");
        assert_eq!(record.source_id.as_str(), "meity");
        assert_eq!(
            record.link.as_deref(),
            Some("https://www.meity.gov.in/documents/press-release/sample-release")
        );
        assert_eq!(record.detected_at.to_rfc3339(), "2026-01-21T13:02:04+00:00");
        // HTML stripped from the carried excerpt.
        let content = record.content.unwrap();
        assert!(!content.contains('<'));
        assert!(content.contains("72 hours"));
        assert!(record.matched_keywords.unwrap().len() >= 2);
    }

    #[test]
    fn short_titles_are_dropped() {
        assert!(provider().process_post(&post("Too short", "data privacy")).is_none());
    }

    #[test]
    fn irrelevant_posts_are_dropped() {
        let record = provider().process_post(&post(
            "Minister inaugurates new regional office building",
            "Ribbon cutting ceremony details.",
        ));
        assert!(record.is_none());
    }

    #[test]
    fn enforcement_language_scores_critical() {
        let record = provider()
            .process_post(&post(
                "Penalty order for breach of data protection obligations",
                "Enforcement action announced for non-compliance.",
            ))
            .expect("relevant post");
        assert_eq!(record.risk_level, RiskLevel::Critical);
    }

    #[test]
    fn unparsable_dates_fall_back_to_epoch() {
        let mut p = post("Advisory on personal data protection rules", "privacy consent");
        p.post_date = "21 Jan 2026".to_string();
        let record = provider().process_post(&p).expect("relevant post");
        assert_eq!(record.detected_at, DateTime::UNIX_EPOCH);
    }

    #[test]
    fn missing_slug_falls_back_to_guid_link() {
        let mut p = post("Advisory on personal data protection rules", "privacy consent");
        p.post_slug = String::new();
        let record = provider().process_post(&p).expect("relevant post");
        assert_eq!(record.link.as_deref(), Some("https://www.meity.gov.in/?p=4821"));
    }

    #[test]
    fn excerpt_is_capped() {
        let long = "data privacy ".repeat(100);
        let record = provider()
            .process_post(&post("Advisory on personal data protection rules", &long))
            .expect("relevant post");
        assert!(record.content.unwrap().chars().count() <= EXCERPT_CHARS);
    }

    #[test]
    fn identifier_prefers_id_then_slug() {
        let mut p = post("Advisory on personal data protection rules", "privacy consent");
        assert_eq!(post_identifier(&p).as_deref(), Some("4821"));
        p.id = None;
        assert_eq!(post_identifier(&p).as_deref(), Some("sample-release"));
        p.post_slug = String::new();
        assert!(post_identifier(&p).is_none());
    }
}
