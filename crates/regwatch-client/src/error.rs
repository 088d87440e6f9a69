//! RegWatch API client error types.

/// Errors from RegWatch API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    /// The update text was empty or whitespace-only; no request was made.
    #[error("update text must not be empty")]
    EmptyUpdateText,

    /// An analysis request is already in flight on this client handle.
    #[error("an analysis request is already in flight")]
    AnalysisInFlight,

    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The API returned a non-2xx status.
    #[error("API {endpoint} returned {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}
