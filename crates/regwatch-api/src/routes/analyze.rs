//! # Analysis API
//!
//! Submits free-form regulatory update text to the analysis pipeline and
//! returns the structured assessment. When no LLM key is configured the
//! endpoint reports 503 rather than failing at startup — the rest of the
//! API keeps serving.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use regwatch_core::AnalysisResult;

use crate::error::AppError;
use crate::state::AppState;

/// Request body of the analysis endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct AnalyzeRequest {
    /// The regulatory update text to analyze.
    pub update_text: String,
}

/// Build the analyze router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/analyze-update", post(analyze_update))
}

/// POST /api/analyze-update — Analyze a regulatory update.
///
/// Empty or whitespace-only text is rejected before any model call.
#[utoipa::path(
    post,
    path = "/api/analyze-update",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Structured analysis result", body = AnalysisResult),
        (status = 422, description = "Empty update text", body = crate::error::ErrorBody),
        (status = 502, description = "Analysis service failed", body = crate::error::ErrorBody),
        (status = 503, description = "Analysis not configured", body = crate::error::ErrorBody),
    ),
    tag = "analysis"
)]
async fn analyze_update(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    if req.update_text.trim().is_empty() {
        return Err(AppError::Validation(
            "update_text must not be empty".to_string(),
        ));
    }

    let analyzer = state.analyzer.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable("analysis pipeline not configured".to_string())
    })?;

    let result = analyzer.analyze(&req.update_text).await?;
    Ok(Json(result))
}
