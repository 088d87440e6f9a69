//! Keyword-based obligation retrieval.
//!
//! The retrieval step picks the obligation most relevant to an update
//! before the LLM sees anything: trigger-word rules carry the most weight,
//! then title words, then description words and category mentions. The
//! scoring is deterministic and pure, so the same update always grounds
//! against the same obligation.

use crate::knowledge::{KnowledgeBase, Obligation};

/// Trigger words mapped to the obligation they indicate.
const RETRIEVAL_RULES: &[(&str, &str)] = &[
    ("breach", "DPDP-004"),
    ("notify", "DPDP-004"),
    ("notification", "DPDP-004"),
    ("consent", "DPDP-001"),
    ("retention", "DPDP-006"),
    ("delete", "DPDP-006"),
    ("deletion", "DPDP-006"),
    ("erasure", "DPDP-006"),
    ("access", "DPDP-002"),
    ("correction", "DPDP-002"),
    ("rights", "DPDP-002"),
    ("security", "DPDP-003"),
    ("safeguard", "DPDP-003"),
    ("transfer", "DPDP-005"),
    ("cross-border", "DPDP-005"),
];

/// Weight of a trigger-rule match.
const RULE_WEIGHT: u32 = 3;
/// Weight of a title-word match.
const TITLE_WEIGHT: u32 = 2;
/// Weight of a description-word match.
const DESCRIPTION_WEIGHT: u32 = 1;
/// Weight of a category mention.
const CATEGORY_WEIGHT: u32 = 2;

/// Retrieve the obligation most relevant to the update text.
///
/// Falls back to the first obligation when nothing scores; returns `None`
/// only for an empty knowledge base. Ties resolve to the earliest
/// obligation in document order.
pub fn retrieve_relevant_obligation<'a>(
    update_text: &str,
    knowledge: &'a KnowledgeBase,
) -> Option<&'a Obligation> {
    let obligations = knowledge.obligations();
    let update_lower = update_text.to_lowercase();

    let mut best: Option<(&Obligation, u32)> = None;
    for obligation in obligations {
        let score = score_obligation(&update_lower, obligation);
        if score > 0 {
            match best {
                Some((_, best_score)) if best_score >= score => {}
                _ => best = Some((obligation, score)),
            }
        }
    }

    best.map(|(o, _)| o).or_else(|| obligations.first())
}

fn score_obligation(update_lower: &str, obligation: &Obligation) -> u32 {
    let mut score = 0;

    for (keyword, rule_id) in RETRIEVAL_RULES {
        if update_lower.contains(keyword) && *rule_id == obligation.id {
            score += RULE_WEIGHT;
        }
    }

    if word_overlap(update_lower, &obligation.title) {
        score += TITLE_WEIGHT;
    }
    if word_overlap(update_lower, &obligation.description) {
        score += DESCRIPTION_WEIGHT;
    }
    let category = obligation.category.to_lowercase();
    if !category.is_empty() && update_lower.contains(&category) {
        score += CATEGORY_WEIGHT;
    }

    score
}

/// Whether any whitespace-separated word of `text` occurs in the update.
fn word_overlap(update_lower: &str, text: &str) -> bool {
    text.split_whitespace()
        .any(|word| update_lower.contains(&word.to_lowercase()))
}
