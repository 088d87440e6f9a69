//! # regwatch-api — Axum HTTP Service for RegWatch
//!
//! Serves the compliance-monitoring API consumed by the dashboard.
//!
//! ## API Surface
//!
//! | Method | Path                        | Module                |
//! |--------|-----------------------------|-----------------------|
//! | GET    | `/health`                   | this module           |
//! | GET    | `/api/changes`              | [`routes::changes`]   |
//! | GET    | `/api/changes/:id`          | [`routes::changes`]   |
//! | GET    | `/api/sources`              | [`routes::sources`]   |
//! | POST   | `/api/sources`              | [`routes::sources`]   |
//! | PUT    | `/api/sources/:id`          | [`routes::sources`]   |
//! | DELETE | `/api/sources/:id`          | [`routes::sources`]   |
//! | POST   | `/api/sources/:id/toggle`   | [`routes::sources`]   |
//! | GET    | `/api/stats`                | [`routes::stats`]     |
//! | POST   | `/api/analyze-update`       | [`routes::analyze`]   |
//! | GET    | `/openapi.json`             | [`openapi`]           |
//!
//! Route handlers hold no business logic: filtering lives in
//! `regwatch-core`, ingestion in `regwatch-feed`, and analysis in
//! `regwatch-agent`. All errors map to structured HTTP responses via
//! [`AppError`].

pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use state::{AppConfig, AppState};

use axum::extract::State;
use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origin);

    Router::new()
        .route("/health", get(health))
        .merge(routes::changes::router())
        .merge(routes::sources::router())
        .merge(routes::stats::router())
        .merge(routes::analyze::router())
        .merge(openapi::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the CORS layer for the dashboard origin.
///
/// `*` (or an unparsable origin value) falls back to allowing any origin —
/// preferable to silently blocking the dashboard in development.
fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::PUT, Method::DELETE];
    match allowed_origin {
        "*" => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any),
        origin => match origin.parse::<HeaderValue>() {
            Ok(value) => CorsLayer::new()
                .allow_origin(value)
                .allow_methods(methods)
                .allow_headers([header::CONTENT_TYPE]),
            Err(_) => {
                tracing::warn!(origin, "unparsable allowed origin — allowing any");
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(methods)
                    .allow_headers(Any)
            }
        },
    }
}

/// Health payload reported by `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"` while the process serves requests.
    pub status: String,
    /// Which feed backend hydrated the stores (`static` / `remote`).
    pub provider: String,
    /// Whether the analysis pipeline is configured.
    pub analysis: bool,
    /// Number of change records in the store.
    pub changes: usize,
    /// Number of registered sources.
    pub sources: usize,
}

/// GET /health — Liveness plus a snapshot of the store shape.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        provider: state.provider_kind.to_string(),
        analysis: state.analyzer.is_some(),
        changes: state.changes.len(),
        sources: state.sources.len(),
    })
}
