mod common;

use axum::{body::Body, http::Request, http::StatusCode};
use common::{get, router_with, send, test_config};
use cryptvest_service::services::StoreStatus;
use cryptvest_service::startup::{build_router, AppState};
use serde_json::json;

// =============================================================================
// Static endpoints
// =============================================================================

#[tokio::test]
async fn root_returns_greeting() {
    let app = router_with(StoreStatus::Unconfigured);

    let first = send(&app, get("/")).await;
    let second = send(&app, get("/")).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.json(), json!({ "message": "Hello from FastAPI Backend!" }));
    assert_eq!(first.body, second.body);
}

#[tokio::test]
async fn api_hello_returns_greeting() {
    let app = router_with(StoreStatus::Unconfigured);

    let first = send(&app, get("/api/hello")).await;
    let second = send(&app, get("/api/hello")).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.json(), json!({ "message": "Hello from the backend API!" }));
    assert_eq!(first.body, second.body);
}

#[tokio::test]
async fn demo_portfolio_is_fixed() {
    let app = router_with(StoreStatus::Unconfigured);

    let first = send(&app, get("/api/demo-portfolio")).await;
    let second = send(&app, get("/api/demo-portfolio")).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body, second.body);

    let body = first.json();
    let allocations = body["allocations"].as_array().unwrap();
    let total: u64 = allocations
        .iter()
        .map(|a| a["percent"].as_u64().unwrap())
        .sum();
    assert_eq!(total, 100);
    assert_eq!(allocations[0], json!({ "asset": "BTC", "percent": 48, "value": 48250 }));
    assert_eq!(body["equity_curve"].as_array().unwrap().len(), 7);
    assert_eq!(body["equity_curve"][6], json!({ "t": "now", "v": 100450 }));
    assert_eq!(
        body["stats"],
        json!({
            "total_value": 100450,
            "one_day": 2.6,
            "one_week": 7.4,
            "one_month": 13.8,
            "best_asset": "SOL"
        })
    );
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = router_with(StoreStatus::Unconfigured);
    let response = send(&app, get("/nope")).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Middleware
// =============================================================================

#[tokio::test]
async fn request_id_is_generated_and_echoed() {
    let app = router_with(StoreStatus::Unconfigured);

    let generated = send(&app, get("/")).await;
    assert!(!generated.headers["x-request-id"].is_empty());

    let request = Request::builder()
        .uri("/")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();
    let echoed = send(&app, request).await;
    assert_eq!(echoed.headers["x-request-id"], "req-123");
}

#[tokio::test]
async fn security_headers_are_set() {
    let app = router_with(StoreStatus::Unconfigured);
    let response = send(&app, get("/api/hello")).await;

    assert_eq!(response.headers["x-content-type-options"], "nosniff");
    assert_eq!(response.headers["x-frame-options"], "DENY");
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() {
    let app = router_with(StoreStatus::Unconfigured);

    let preflight = Request::builder()
        .method("OPTIONS")
        .uri("/leads")
        .header("origin", "https://frontend.example")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, preflight).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers["access-control-allow-origin"], "*");
}

fn preflight(origin: &str) -> Request<Body> {
    Request::builder()
        .method("OPTIONS")
        .uri("/connect")
        .header("origin", origin)
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type,x-custom")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn cors_with_origin_list_allows_only_listed_origins() {
    let mut config = test_config();
    config.cors.allowed_origins = vec!["https://a.example".to_string()];
    let app = build_router(AppState::new(config, StoreStatus::Unconfigured));

    let allowed = send(&app, preflight("https://a.example")).await;
    assert_eq!(allowed.status, StatusCode::OK);
    assert_eq!(
        allowed.headers["access-control-allow-origin"],
        "https://a.example"
    );
    assert_eq!(allowed.headers["access-control-allow-credentials"], "true");
    assert_eq!(allowed.headers["access-control-allow-methods"], "POST");
    assert_eq!(
        allowed.headers["access-control-allow-headers"],
        "content-type,x-custom"
    );

    let foreign = send(&app, preflight("https://evil.example")).await;
    assert!(foreign
        .headers
        .get("access-control-allow-origin")
        .is_none());
}
