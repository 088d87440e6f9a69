//! Integration tests over the fully assembled application router:
//! endpoint wiring, error body shape, and the dashboard's read-modify
//! flow against the hydrated fixture state.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use regwatch_api::{app, AppState};
use regwatch_core::{ChangesPage, SourceRecord, Stats};
use regwatch_feed::{ChangeProvider, StaticProvider};

async fn seeded_app() -> (axum::Router, AppState) {
    let state = AppState::new();
    let provider = ChangeProvider::Static(StaticProvider::new());
    state.hydrate_from_provider(&provider).await.unwrap();
    (app(state.clone()), state)
}

async fn body_json<T: serde::de::DeserializeOwned>(resp: axum::response::Response) -> T {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn full_surface_is_wired() {
    let (app, _) = seeded_app().await;

    for uri in [
        "/health",
        "/api/changes",
        "/api/changes/chg-001",
        "/api/sources",
        "/api/stats",
        "/openapi.json",
    ] {
        let resp = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "GET {uri}");
    }
}

#[tokio::test]
async fn error_bodies_follow_the_structured_shape() {
    let (app, _) = seeded_app().await;
    let resp = app.oneshot(get("/api/changes/chg-404")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("chg-404"));
}

#[tokio::test]
async fn source_mutations_are_visible_to_stats() {
    let (app, _state) = seeded_app().await;

    // Toggle a monitored source off.
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/sources/src-002/toggle")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let toggled: SourceRecord = body_json(resp).await;
    assert!(!toggled.monitoring);

    // Stats reflect the change immediately.
    let resp = app.clone().oneshot(get("/api/stats")).await.unwrap();
    let stats: Stats = body_json(resp).await;
    assert_eq!(stats.total_sources, 5);
    assert_eq!(stats.sources_monitored, 3);
}

#[tokio::test]
async fn filtered_listing_matches_fixture_content() {
    let (app, _) = seeded_app().await;
    let resp = app
        .oneshot(get("/api/changes?risk=high&q=data"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let page: ChangesPage = body_json(resp).await;
    assert_eq!(page.changes.len(), 1);
    assert_eq!(page.changes[0].id.as_str(), "chg-002");
}

#[tokio::test]
async fn analyze_without_configuration_returns_503_with_error_body() {
    let (app, _) = seeded_app().await;
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/analyze-update")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::json!({"update_text": "Breach window tightened."}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["error"]["code"], "SERVICE_UNAVAILABLE");
}
