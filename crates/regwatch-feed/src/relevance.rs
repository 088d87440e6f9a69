//! Keyword relevance and risk scoring for ingested publications.
//!
//! A publication is worth surfacing when at least two watch keywords match
//! its combined title and content. Risk escalates with match density and
//! with the presence of enforcement-flavored keywords.

use regwatch_core::RiskLevel;

/// Watch keywords that mark a publication as relevant.
pub const WATCH_KEYWORDS: &[&str] = &[
    "data",
    "digital",
    "personal",
    "protection",
    "privacy",
    "breach",
    "consent",
    "security",
    "reporting",
    "fiduciary",
    "board",
    "penalty",
    "dpdp",
    "dpdpa",
];

/// Keywords signalling enforcement or penalty exposure.
const CRITICAL_KEYWORDS: &[&str] = &["breach", "penalty", "violation", "enforcement", "compliance"];

/// Minimum watch-keyword matches for a publication to be relevant.
pub const RELEVANCE_THRESHOLD: usize = 2;

/// Return the watch keywords present in the combined text, lowercased
/// matching, in the canonical keyword order.
pub fn matched_keywords(title: &str, content: &str) -> Vec<String> {
    let combined = format!("{title} {content}").to_lowercase();
    WATCH_KEYWORDS
        .iter()
        .filter(|kw| combined.contains(*kw))
        .map(|kw| kw.to_string())
        .collect()
}

/// Whether the match set clears the relevance threshold.
pub fn is_relevant(matched: &[String]) -> bool {
    matched.len() >= RELEVANCE_THRESHOLD
}

/// Score the risk level from the match set and the combined text.
///
/// Critical when two or more enforcement keywords appear or the watch
/// match count reaches five; high at three matches; medium at two; low
/// otherwise.
pub fn score_risk(matched: &[String], title: &str, content: &str) -> RiskLevel {
    let combined = format!("{title} {content}").to_lowercase();
    let critical_matches = CRITICAL_KEYWORDS
        .iter()
        .filter(|kw| combined.contains(*kw))
        .count();

    if critical_matches >= 2 || matched.len() >= 5 {
        RiskLevel::Critical
    } else if matched.len() >= 3 {
        RiskLevel::High
    } else if matched.len() >= 2 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_is_case_insensitive() {
        let matched = matched_keywords("Digital Personal DATA Protection", "");
        assert_eq!(matched, vec!["data", "digital", "personal", "protection"]);
    }

    #[test]
    fn relevance_needs_two_matches() {
        let one = matched_keywords("privacy update", "");
        assert!(!is_relevant(&one));
        let two = matched_keywords("privacy and consent update", "");
        assert!(is_relevant(&two));
    }

    #[test]
    fn two_enforcement_keywords_escalate_to_critical() {
        let title = "Penalty framework for breach reporting";
        let matched = matched_keywords(title, "");
        assert_eq!(score_risk(&matched, title, ""), RiskLevel::Critical);
    }

    #[test]
    fn five_watch_matches_escalate_to_critical() {
        let title = "Digital personal data protection and privacy rules";
        let matched = matched_keywords(title, "");
        assert!(matched.len() >= 5);
        assert_eq!(score_risk(&matched, title, ""), RiskLevel::Critical);
    }

    #[test]
    fn three_matches_score_high() {
        let title = "Consent rules for personal data";
        let matched = matched_keywords(title, "");
        assert_eq!(matched.len(), 3);
        assert_eq!(score_risk(&matched, title, ""), RiskLevel::High);
    }

    #[test]
    fn two_matches_score_medium() {
        let title = "Data privacy note";
        let matched = matched_keywords(title, "");
        assert_eq!(matched.len(), 2);
        assert_eq!(score_risk(&matched, title, ""), RiskLevel::Medium);
    }

    #[test]
    fn sparse_text_scores_low() {
        let title = "Annual report published";
        let matched = matched_keywords(title, "");
        assert_eq!(score_risk(&matched, title, ""), RiskLevel::Low);
    }
}
