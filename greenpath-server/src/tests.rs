use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Router backed by a throwaway store file so tests never touch each
/// other's session state. Validation paths fail before any collaborator
/// request, so no network is needed.
fn test_app(name: &str) -> Router {
    let mut config = ServerConfig::default();
    config.store_path =
        std::env::temp_dir().join(format!("greenpath-test-{}-{name}.json", std::process::id()));
    let _ = std::fs::remove_file(&config.store_path);
    let state = AppState::new(config).expect("test state");
    crate::app(Arc::new(state))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn newer_search_supersedes_older_token() {
    let mut config = ServerConfig::default();
    config.store_path = std::env::temp_dir().join(format!(
        "greenpath-test-{}-generation.json",
        std::process::id()
    ));
    let state = AppState::new(config).expect("test state");

    let first = state.begin_search();
    assert!(state.is_current(first));

    let second = state.begin_search();
    assert!(!state.is_current(first));
    assert!(state.is_current(second));
}

#[tokio::test]
async fn health_is_ok() {
    let response = test_app("health")
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn route_proxy_rejects_missing_coordinates() {
    let (status, body) = get(test_app("route-missing"), "/route?profile=car").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MissingInput");
    assert!(body["error"].as_str().unwrap().contains("start or end"));
}

#[tokio::test]
async fn compare_rejects_empty_origin() {
    let (status, body) = get(
        test_app("compare-origin"),
        "/compare?origin=&destination=Chennai",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MissingInput");
}

#[tokio::test]
async fn compare_rejects_weights_not_summing_to_hundred() {
    let (status, body) = get(
        test_app("compare-weights"),
        "/compare?origin=a&destination=b&time=90&cost=90&emissions=90",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "InvalidInput");
}

#[tokio::test]
async fn compare_rejects_unknown_mode() {
    let (status, body) = get(
        test_app("compare-mode"),
        "/compare?origin=a&destination=b&modes=walk,teleport",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "InvalidInput");
    assert!(body["error"].as_str().unwrap().contains("teleport"));
}

#[tokio::test]
async fn geocode_rejects_empty_query() {
    let (status, body) = get(test_app("geocode-empty"), "/geocode?q=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MissingInput");
}

#[tokio::test]
async fn freight_rejects_passenger_method() {
    let (status, body) = get(
        test_app("freight-mode"),
        "/freight?method=bike&weight_kg=500&distance_km=100",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "InvalidInput");
}

#[tokio::test]
async fn freight_computes_ton_kilometre_emissions() {
    let (status, body) = get(
        test_app("freight-truck"),
        "/freight?method=freightTruck&weight_kg=500&distance_km=100",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ton_km"], 50.0);
    // 0.5 t x 100 km x 62 g/t-km
    assert_eq!(body["emissions_grams"], 3100.0);
    assert_eq!(body["emissions_label"], "3.10 kg CO₂");
}

#[tokio::test]
async fn tips_returns_full_catalogue() {
    let (status, body) = get(test_app("tips"), "/tips").await;
    assert_eq!(status, StatusCode::OK);
    let tips = body["tips"].as_array().unwrap();
    assert_eq!(tips.len(), 8);
    assert!(tips.iter().all(|t| t["title"].is_string()));
}

#[tokio::test]
async fn stats_reports_seeded_session() {
    let (status, body) = get(test_app("stats"), "/stats").await;
    assert_eq!(status, StatusCode::OK);
    // Fresh store: demo seed of 24.7 kg saved.
    assert_eq!(body["credits"], 247);
    assert_eq!(body["level"], 3);
    assert_eq!(body["history"].as_array().unwrap().len(), 5);
    assert_eq!(body["totals"]["trips"], 5);
}

#[tokio::test]
async fn record_trip_awards_credits_and_persists() {
    let app = test_app("trips");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/trips")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"mode":"bike","distance_km":10.0}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    // 10 km by bike saves 1920 g against a car, on top of the 24.7 kg seed.
    assert_eq!(body["credits_earned"], 19);
    assert_eq!(body["credits"], 266);

    let (status, stats) = get(app, "/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["credits"], 266);
    assert_eq!(stats["history"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn record_trip_rejects_nonpositive_distance() {
    let response = test_app("trips-invalid")
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/trips")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"mode":"walk","distance_km":-2.0}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
