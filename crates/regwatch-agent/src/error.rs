//! Analysis agent error types.

use std::path::PathBuf;

/// Errors from the analysis pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The update text was empty or whitespace-only; no request was made.
    #[error("update text must not be empty")]
    EmptyUpdateText,

    /// No LLM API key is configured.
    #[error("LLM API key not configured (set REGWATCH_LLM_API_KEY)")]
    MissingApiKey,

    /// A knowledge or cache file could not be read.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A knowledge or cache file could not be written.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A knowledge or cache file contained invalid JSON.
    #[error("invalid JSON in {path}: {source}")]
    FileParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The knowledge base holds no obligations to retrieve against.
    #[error("compliance knowledge base is empty")]
    EmptyKnowledgeBase,

    /// HTTP transport error calling the LLM service.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The LLM service returned a non-2xx status.
    #[error("LLM service returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The LLM service response envelope could not be decoded.
    #[error("failed to decode response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The LLM response carried no candidate text.
    #[error("LLM response contained no candidate text")]
    EmptyResponse,

    /// The LLM response text was not the expected JSON shape.
    #[error("failed to parse analysis result: {source}; raw response: {raw}")]
    ResultParse {
        source: serde_json::Error,
        raw: String,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}
