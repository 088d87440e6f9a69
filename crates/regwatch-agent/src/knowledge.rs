//! Knowledge base loading and lookups.
//!
//! The agent grounds every analysis in two JSON documents kept in the data
//! directory: the company profile (who the analysis is for) and the
//! compliance knowledge base (the obligations updates are matched against).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AgentError;

/// File name of the company profile document.
pub const COMPANY_PROFILE_FILE: &str = "company_profile.json";

/// File name of the compliance knowledge document.
pub const COMPLIANCE_KNOWLEDGE_FILE: &str = "compliance_knowledge.json";

/// The company the agent analyzes updates for.
///
/// Only the name is modeled explicitly; the remaining profile fields are
/// carried verbatim so the prompt always embeds the complete document,
/// whatever shape the deployment's profile takes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Company display name.
    #[serde(default)]
    pub company_name: String,
    /// Remaining profile fields, embedded into prompts as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A single compliance obligation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obligation {
    /// Obligation identifier (e.g. "DPDP-004").
    pub id: String,
    /// Short title.
    #[serde(default)]
    pub title: String,
    /// Full description.
    #[serde(default)]
    pub description: String,
    /// Category label (e.g. "breach notification").
    #[serde(default)]
    pub category: String,
    /// Severity label (e.g. "critical").
    #[serde(default)]
    pub severity: String,
}

/// The compliance knowledge document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplianceKnowledge {
    /// Framework name (e.g. "DPDP Act 2023").
    #[serde(default)]
    pub framework: String,
    /// The obligations updates are retrieved against, in document order.
    #[serde(default)]
    pub obligations: Vec<Obligation>,
}

/// Loaded knowledge base: profile plus obligations.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    /// The company profile.
    pub profile: CompanyProfile,
    /// The compliance knowledge.
    pub knowledge: ComplianceKnowledge,
}

impl KnowledgeBase {
    /// Load both documents from the data directory.
    ///
    /// Missing or malformed files are errors — an agent with no knowledge
    /// base produces groundless analyses, so startup fails loudly instead.
    pub fn load(data_dir: &Path) -> Result<Self, AgentError> {
        let profile: CompanyProfile = read_json(&data_dir.join(COMPANY_PROFILE_FILE))?;
        let knowledge: ComplianceKnowledge = read_json(&data_dir.join(COMPLIANCE_KNOWLEDGE_FILE))?;
        tracing::info!(
            company = %profile.company_name,
            framework = %knowledge.framework,
            obligations = knowledge.obligations.len(),
            "knowledge base loaded"
        );
        Ok(Self { profile, knowledge })
    }

    /// The obligations in document order.
    pub fn obligations(&self) -> &[Obligation] {
        &self.knowledge.obligations
    }

    /// Find an obligation by id.
    pub fn obligation_by_id(&self, id: &str) -> Option<&Obligation> {
        self.knowledge.obligations.iter().find(|o| o.id == id)
    }

    /// All obligations marked critical.
    pub fn critical_obligations(&self) -> Vec<&Obligation> {
        self.knowledge
            .obligations
            .iter()
            .filter(|o| o.severity.eq_ignore_ascii_case("critical"))
            .collect()
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> Result<T, AgentError> {
    let raw = std::fs::read_to_string(path).map_err(|source| AgentError::FileRead {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| AgentError::FileParse {
        path: path.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fixtures(dir: &Path) {
        std::fs::write(
            dir.join(COMPANY_PROFILE_FILE),
            serde_json::json!({
                "company_name": "Acme Fintech",
                "industry": "Digital Lending",
                "data_categories": ["pan", "aadhaar"]
            })
            .to_string(),
        )
        .unwrap();
        std::fs::write(
            dir.join(COMPLIANCE_KNOWLEDGE_FILE),
            serde_json::json!({
                "framework": "DPDP Act 2023",
                "obligations": [
                    {"id": "DPDP-001", "title": "Consent management", "description": "Obtain valid consent", "category": "consent", "severity": "high"},
                    {"id": "DPDP-004", "title": "Breach notification", "description": "Notify the Board of breaches", "category": "breach notification", "severity": "critical"}
                ]
            })
            .to_string(),
        )
        .unwrap();
    }

    #[test]
    fn loads_profile_and_knowledge() {
        let dir = tempfile::tempdir().unwrap();
        write_fixtures(dir.path());
        let kb = KnowledgeBase::load(dir.path()).unwrap();
        assert_eq!(kb.profile.company_name, "Acme Fintech");
        assert_eq!(kb.knowledge.framework, "DPDP Act 2023");
        assert_eq!(kb.obligations().len(), 2);
        // Extra profile fields survive the round trip.
        assert!(kb.profile.extra.contains_key("industry"));
    }

    #[test]
    fn lookups_work() {
        let dir = tempfile::tempdir().unwrap();
        write_fixtures(dir.path());
        let kb = KnowledgeBase::load(dir.path()).unwrap();
        assert_eq!(kb.obligation_by_id("DPDP-004").unwrap().title, "Breach notification");
        assert!(kb.obligation_by_id("DPDP-999").is_none());
        let critical = kb.critical_obligations();
        assert_eq!(critical.len(), 1);
        assert_eq!(critical[0].id, "DPDP-004");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = KnowledgeBase::load(dir.path()).unwrap_err();
        assert!(matches!(err, AgentError::FileRead { .. }));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(COMPANY_PROFILE_FILE), "{not json").unwrap();
        let err = KnowledgeBase::load(dir.path()).unwrap_err();
        assert!(matches!(err, AgentError::FileParse { .. }));
    }
}
