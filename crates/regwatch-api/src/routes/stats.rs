//! # Stats API
//!
//! Aggregate monitoring statistics for the dashboard header.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use regwatch_core::Stats;

use crate::state::AppState;

/// Build the stats router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/stats", get(get_stats))
}

/// GET /api/stats — Statistics computed from the current record sets.
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Monitoring statistics", body = Stats),
    ),
    tag = "stats"
)]
async fn get_stats(State(state): State<AppState>) -> Json<Stats> {
    Json(Stats::compute(&state.sources.list(), &state.changes.list()))
}
