//! # Changes API
//!
//! Read-only endpoints over the hydrated change records.
//!
//! ## Endpoints
//!
//! - `GET /api/changes` — paginated listing with optional risk, source,
//!   and free-text filters, newest first
//! - `GET /api/changes/:id` — single change by id

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use regwatch_core::{ChangeFilter, ChangeRecord, ChangesPage, RiskLevel, SourceId};

use crate::error::AppError;
use crate::state::AppState;

/// Default page size when `limit` is absent.
const DEFAULT_LIMIT: u32 = 10;
/// Upper bound on the page size.
const MAX_LIMIT: u32 = 100;

/// Query parameters of the changes listing.
#[derive(Debug, Default, Deserialize)]
pub struct ChangesQuery {
    /// 1-based page number (default 1).
    pub page: Option<u32>,
    /// Page size (default 10, max 100).
    pub limit: Option<u32>,
    /// Risk level filter ("low" | "medium" | "high" | "critical").
    pub risk: Option<String>,
    /// Source id filter.
    pub source: Option<String>,
    /// Case-insensitive substring matched against summary and source name.
    pub q: Option<String>,
}

impl ChangesQuery {
    /// Build the change filter from the query, rejecting unknown values.
    fn filter(&self) -> Result<ChangeFilter, AppError> {
        let risk = match &self.risk {
            Some(raw) if !raw.trim().is_empty() && raw.trim() != "all" => Some(
                raw.parse::<RiskLevel>()
                    .map_err(|e| AppError::Validation(e.to_string()))?,
            ),
            _ => None,
        };
        let source = match &self.source {
            Some(raw) if !raw.trim().is_empty() && raw.trim() != "all" => Some(
                raw.parse::<SourceId>()
                    .map_err(|e| AppError::Validation(e.to_string()))?,
            ),
            _ => None,
        };
        Ok(ChangeFilter {
            risk,
            source,
            query: self.q.clone().unwrap_or_default(),
        })
    }
}

/// Build the changes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/changes", get(list_changes))
        .route("/api/changes/:change_id", get(get_change))
}

/// GET /api/changes — Paginated, filtered change listing.
///
/// Filters apply before pagination, so `total`/`totalPages` describe the
/// filtered set. An empty page is a valid response, not an error.
#[utoipa::path(
    get,
    path = "/api/changes",
    params(
        ("page" = Option<u32>, Query, description = "1-based page number (default 1)"),
        ("limit" = Option<u32>, Query, description = "Page size (default 10, max 100)"),
        ("risk" = Option<String>, Query, description = "Risk level filter, or \"all\""),
        ("source" = Option<String>, Query, description = "Source id filter, or \"all\""),
        ("q" = Option<String>, Query, description = "Case-insensitive text filter"),
    ),
    responses(
        (status = 200, description = "One page of changes, newest first", body = ChangesPage),
        (status = 422, description = "Unknown risk level or malformed filter", body = crate::error::ErrorBody),
    ),
    tag = "changes"
)]
async fn list_changes(
    State(state): State<AppState>,
    Query(query): Query<ChangesQuery>,
) -> Result<Json<ChangesPage>, AppError> {
    let filter = query.filter()?;
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let filtered = filter.apply(&state.changes.list());
    let total = filtered.len() as u64;
    let total_pages = (filtered.len() as u32).div_ceil(limit);
    let start = ((page - 1) as usize) * limit as usize;
    let changes: Vec<ChangeRecord> = filtered
        .into_iter()
        .skip(start)
        .take(limit as usize)
        .collect();

    Ok(Json(ChangesPage {
        changes,
        total,
        page,
        limit,
        total_pages,
    }))
}

/// GET /api/changes/:id — Single change by id.
#[utoipa::path(
    get,
    path = "/api/changes/{change_id}",
    params(("change_id" = String, Path, description = "Change id")),
    responses(
        (status = 200, description = "Change details", body = ChangeRecord),
        (status = 404, description = "Change not found", body = crate::error::ErrorBody),
    ),
    tag = "changes"
)]
async fn get_change(
    State(state): State<AppState>,
    Path(change_id): Path<String>,
) -> Result<Json<ChangeRecord>, AppError> {
    state
        .changes
        .get(&change_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("change {change_id} not found")))
}
