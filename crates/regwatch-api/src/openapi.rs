//! OpenAPI document generation.
//!
//! The document is derived from the handler and schema annotations across
//! the route modules and served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// OpenAPI document for the RegWatch API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "RegWatch API",
        description = "Compliance monitoring: regulatory sources, detected changes, and AI analysis.",
    ),
    paths(
        crate::routes::changes::list_changes,
        crate::routes::changes::get_change,
        crate::routes::sources::list_sources,
        crate::routes::sources::create_source,
        crate::routes::sources::update_source,
        crate::routes::sources::delete_source,
        crate::routes::sources::toggle_source,
        crate::routes::stats::get_stats,
        crate::routes::analyze::analyze_update,
    ),
    components(schemas(
        regwatch_core::ChangeId,
        regwatch_core::SourceId,
        regwatch_core::ChangeRecord,
        regwatch_core::ChangesPage,
        regwatch_core::SourceRecord,
        regwatch_core::SourceStatus,
        regwatch_core::RiskLevel,
        regwatch_core::Stats,
        regwatch_core::AnalysisResult,
        regwatch_core::AnalysisTask,
        regwatch_core::RetrievedObligation,
        crate::routes::sources::SourceListResponse,
        crate::routes::sources::CreateSourceRequest,
        crate::routes::sources::UpdateSourceRequest,
        crate::routes::analyze::AnalyzeRequest,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "changes", description = "Detected regulatory changes"),
        (name = "sources", description = "Monitored source registry"),
        (name = "stats", description = "Aggregate statistics"),
        (name = "analysis", description = "AI analysis of regulatory updates"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — The generated OpenAPI document.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.contains(&&"/api/changes".to_string()));
        assert!(paths.contains(&&"/api/changes/{change_id}".to_string()));
        assert!(paths.contains(&&"/api/sources".to_string()));
        assert!(paths.contains(&&"/api/sources/{source_id}".to_string()));
        assert!(paths.contains(&&"/api/sources/{source_id}/toggle".to_string()));
        assert!(paths.contains(&&"/api/stats".to_string()));
        assert!(paths.contains(&&"/api/analyze-update".to_string()));
    }

    #[test]
    fn document_serializes() {
        let json = serde_json::to_string(&ApiDoc::openapi()).unwrap();
        assert!(json.contains("RegWatch API"));
    }
}
