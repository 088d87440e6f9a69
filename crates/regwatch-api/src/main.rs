//! # regwatch-api — Binary Entry Point
//!
//! Starts the Axum HTTP server. Binds to a configurable port (default
//! 8000), selects the feed provider from the environment, and hydrates the
//! in-memory stores before serving.

use regwatch_agent::Analyzer;
use regwatch_api::{app, AppConfig, AppState};
use regwatch_feed::ChangeProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();

    // Select the feed provider: remote when REGWATCH_FEED_URL is set.
    let provider = ChangeProvider::from_env().map_err(|e| {
        tracing::error!("Feed provider configuration failed: {e}");
        e
    })?;

    // Build the analysis pipeline when an LLM key is configured; the
    // analyze endpoint reports 503 otherwise.
    let analyzer = Analyzer::from_env(&config.data_dir).map_err(|e| {
        tracing::error!("Analyzer initialization failed: {e}");
        e
    })?;

    let port = config.port;
    let state = AppState::with_config(config, analyzer, provider.kind());

    // Hydration failure is not fatal: the API serves an empty change set
    // and the rest of the surface stays interactive.
    if let Err(e) = state.hydrate_from_provider(&provider).await {
        tracing::warn!("Feed hydration failed — serving empty change set: {e}");
    }

    let app = app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("RegWatch API listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
