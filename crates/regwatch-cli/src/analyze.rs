//! # Analyze Subcommand
//!
//! Submits a regulatory update to the analysis endpoint and prints the
//! structured result.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;

/// Arguments for `regwatch analyze`.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// The update text to analyze.
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the update text from a file.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Print the raw JSON result instead of the summary lines.
    #[arg(long)]
    pub json: bool,
}

impl AnalyzeArgs {
    /// Resolve the update text from `--text` or `--file`.
    pub fn update_text(&self) -> anyhow::Result<String> {
        match (&self.text, &self.file) {
            (Some(text), None) => Ok(text.clone()),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display())),
            (None, None) => bail!("provide the update via --text or --file"),
            // clap's conflicts_with rejects this combination before we run.
            (Some(_), Some(_)) => bail!("--text and --file are mutually exclusive"),
        }
    }
}

/// Run `regwatch analyze`.
pub async fn run_analyze(args: &AnalyzeArgs, api_url: Option<&str>) -> anyhow::Result<u8> {
    let text = args.update_text()?;
    if text.trim().is_empty() {
        bail!("update text must not be empty");
    }

    let client = crate::build_client(api_url)?;
    let result = client
        .analyze_update(&text)
        .await
        .context("analyzing update")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(0);
    }

    println!("Applicable : {}", result.applicable);
    println!("Risk level : {}", result.risk_level);
    println!("Obligation : {}", result.affected_obligation_id);
    println!("Summary    : {}", result.summary);
    if !result.tasks.is_empty() {
        println!("Tasks:");
        for task in &result.tasks {
            println!(
                "  - [{}] {} (due in {} days)",
                task.priority, task.title, task.deadline_days
            );
        }
    }
    if !result.reasoning_steps.is_empty() {
        println!("Reasoning:");
        for step in &result.reasoning_steps {
            println!("  {step}");
        }
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_inline_text() {
        let args = AnalyzeArgs {
            text: Some("breach update".to_string()),
            file: None,
            json: false,
        };
        assert_eq!(args.update_text().unwrap(), "breach update");
    }

    #[test]
    fn resolves_file_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("update.txt");
        std::fs::write(&path, "filed update").unwrap();
        let args = AnalyzeArgs {
            text: None,
            file: Some(path),
            json: false,
        };
        assert_eq!(args.update_text().unwrap(), "filed update");
    }

    #[test]
    fn missing_both_is_an_error() {
        let args = AnalyzeArgs {
            text: None,
            file: None,
            json: false,
        };
        assert!(args.update_text().is_err());
    }
}
