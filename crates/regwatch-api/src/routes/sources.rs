//! # Sources API
//!
//! CRUD over the in-memory source registry. Mutations are deliberately
//! non-durable: the registry is reseeded from the feed provider on every
//! start.
//!
//! ## Endpoints
//!
//! - `GET    /api/sources` — list all sources
//! - `POST   /api/sources` — register a source
//! - `PUT    /api/sources/:id` — replace name/url/category
//! - `DELETE /api/sources/:id` — remove a source
//! - `POST   /api/sources/:id/toggle` — flip monitoring, syncing status

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use regwatch_core::SourceRecord;

use crate::error::AppError;
use crate::state::AppState;

/// Listing envelope for `GET /api/sources`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SourceListResponse {
    /// All registered sources.
    pub sources: Vec<SourceRecord>,
}

/// Request to register a new source.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateSourceRequest {
    /// Display name. Must be non-empty.
    pub name: String,
    /// URL of the publication channel. Must be non-empty.
    pub url: String,
    /// Regulator / framework category.
    #[serde(default)]
    pub category: String,
}

/// Request to edit an existing source. Replaces all three fields.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateSourceRequest {
    /// New display name. Must be non-empty.
    pub name: String,
    /// New URL. Must be non-empty.
    pub url: String,
    /// New category.
    #[serde(default)]
    pub category: String,
}

fn validate_name_and_url(name: &str, url: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }
    if url.trim().is_empty() {
        return Err(AppError::Validation("url must not be empty".to_string()));
    }
    Ok(())
}

/// Build the sources router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/sources", get(list_sources))
        .route("/api/sources", post(create_source))
        .route("/api/sources/:source_id", put(update_source))
        .route("/api/sources/:source_id", delete(delete_source))
        .route("/api/sources/:source_id/toggle", post(toggle_source))
}

/// GET /api/sources — List all registered sources.
#[utoipa::path(
    get,
    path = "/api/sources",
    responses(
        (status = 200, description = "All registered sources", body = SourceListResponse),
    ),
    tag = "sources"
)]
async fn list_sources(State(state): State<AppState>) -> Json<SourceListResponse> {
    let mut sources = state.sources.list();
    // Stable listing order for the dashboard regardless of map iteration.
    sources.sort_by(|a, b| a.id.cmp(&b.id));
    Json(SourceListResponse { sources })
}

/// POST /api/sources — Register a new source.
///
/// Assigns a minted id; new sources start active and monitored.
#[utoipa::path(
    post,
    path = "/api/sources",
    request_body = CreateSourceRequest,
    responses(
        (status = 201, description = "Source registered", body = SourceRecord),
        (status = 422, description = "Missing name or url", body = crate::error::ErrorBody),
    ),
    tag = "sources"
)]
async fn create_source(
    State(state): State<AppState>,
    Json(req): Json<CreateSourceRequest>,
) -> Result<(StatusCode, Json<SourceRecord>), AppError> {
    validate_name_and_url(&req.name, &req.url)?;
    let record = SourceRecord::new(req.name.trim(), req.url.trim(), req.category.trim());
    state.sources.insert(record.id.as_str(), record.clone());
    tracing::info!(source = %record.id, "registered source");
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/sources/:id — Replace name, url, and category.
#[utoipa::path(
    put,
    path = "/api/sources/{source_id}",
    params(("source_id" = String, Path, description = "Source id")),
    request_body = UpdateSourceRequest,
    responses(
        (status = 200, description = "Source updated", body = SourceRecord),
        (status = 404, description = "Source not found", body = crate::error::ErrorBody),
        (status = 422, description = "Missing name or url", body = crate::error::ErrorBody),
    ),
    tag = "sources"
)]
async fn update_source(
    State(state): State<AppState>,
    Path(source_id): Path<String>,
    Json(req): Json<UpdateSourceRequest>,
) -> Result<Json<SourceRecord>, AppError> {
    validate_name_and_url(&req.name, &req.url)?;
    state
        .sources
        .update(&source_id, |source| {
            source.name = req.name.trim().to_string();
            source.url = req.url.trim().to_string();
            source.category = req.category.trim().to_string();
        })
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("source {source_id} not found")))
}

/// DELETE /api/sources/:id — Remove a source.
#[utoipa::path(
    delete,
    path = "/api/sources/{source_id}",
    params(("source_id" = String, Path, description = "Source id")),
    responses(
        (status = 204, description = "Source removed"),
        (status = 404, description = "Source not found", body = crate::error::ErrorBody),
    ),
    tag = "sources"
)]
async fn delete_source(
    State(state): State<AppState>,
    Path(source_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .sources
        .remove(&source_id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| AppError::NotFound(format!("source {source_id} not found")))
}

/// POST /api/sources/:id/toggle — Flip monitoring, syncing status.
#[utoipa::path(
    post,
    path = "/api/sources/{source_id}/toggle",
    params(("source_id" = String, Path, description = "Source id")),
    responses(
        (status = 200, description = "Monitoring toggled", body = SourceRecord),
        (status = 404, description = "Source not found", body = crate::error::ErrorBody),
    ),
    tag = "sources"
)]
async fn toggle_source(
    State(state): State<AppState>,
    Path(source_id): Path<String>,
) -> Result<Json<SourceRecord>, AppError> {
    state
        .sources
        .update(&source_id, SourceRecord::toggle_monitoring)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("source {source_id} not found")))
}
