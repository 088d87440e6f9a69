//! Prompt construction for the analysis model.

use crate::knowledge::{CompanyProfile, Obligation};

/// Build the structured analysis prompt.
///
/// The model is instructed to return the analysis-result JSON shape and
/// nothing else; the response parser still strips markdown fences in case
/// the instruction is ignored.
pub fn build_prompt(profile: &CompanyProfile, update_text: &str, obligation: &Obligation) -> String {
    let profile_json =
        serde_json::to_string_pretty(profile).unwrap_or_else(|_| "{}".to_string());
    let obligation_json =
        serde_json::to_string_pretty(obligation).unwrap_or_else(|_| "{}".to_string());

    format!(
        r#"You are an autonomous compliance agent for Indian DPDP regulatory monitoring. Return valid JSON only.

COMPANY PROFILE:
{profile_json}

REGULATORY UPDATE:
{update_text}

RETRIEVED OBLIGATION:
{obligation_json}

INSTRUCTIONS:
1. Determine if this update is applicable to the company (true/false)
2. Assess risk level: Low, Medium, High, or Critical
3. Generate 2-4 actionable tasks with priorities
4. Assign realistic deadlines in days (Critical=3, High=7, Medium=14, Low=30)
5. Provide short reasoning steps

OUTPUT SCHEMA (JSON only, no markdown, no explanations):
{{
  "applicable": boolean,
  "risk_level": "Low" | "Medium" | "High" | "Critical",
  "affected_obligation_id": "{obligation_id}",
  "summary": "Brief summary of impact",
  "tasks": [
    {{
      "title": "Task description",
      "priority": "Low" | "Medium" | "High",
      "deadline_days": integer
    }}
  ],
  "reasoning_steps": [
    "Step 1: ...",
    "Step 2: ..."
  ]
}}

Return ONLY the JSON object. No markdown formatting. No additional text."#,
        obligation_id = obligation.id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_all_three_inputs() {
        let profile = CompanyProfile {
            company_name: "Acme Fintech".to_string(),
            extra: Default::default(),
        };
        let obligation = Obligation {
            id: "DPDP-004".to_string(),
            title: "Breach notification".to_string(),
            description: "Notify the Board".to_string(),
            category: "breach notification".to_string(),
            severity: "critical".to_string(),
        };
        let prompt = build_prompt(&profile, "Breach window tightened to 72 hours.", &obligation);
        assert!(prompt.contains("Acme Fintech"));
        assert!(prompt.contains("72 hours"));
        assert!(prompt.contains("\"affected_obligation_id\": \"DPDP-004\""));
        assert!(prompt.contains("Return ONLY the JSON object"));
    }
}
