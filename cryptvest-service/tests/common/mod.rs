#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use cryptvest_service::config::{CorsConfig, DatabaseConfig, ObservabilityConfig, ServiceConfig};
use cryptvest_service::services::{DocumentStore, MockStore, StoreStatus};
use cryptvest_service::startup::{build_router, AppState, Application};
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use tower::util::ServiceExt;

pub fn test_config() -> ServiceConfig {
    ServiceConfig {
        common: CoreConfig { port: 0 },
        database: DatabaseConfig {
            url: None,
            name: None,
            timeout_secs: 1,
        },
        cors: CorsConfig::default(),
        observability: ObservabilityConfig {
            log_level: "error".to_string(),
            otlp_endpoint: None,
        },
    }
}

/// Router backed by `store`, plus the mock itself for assertions.
pub fn mock_router(store: MockStore) -> (Router, Arc<MockStore>) {
    let store = Arc::new(store);
    let dyn_store: Arc<dyn DocumentStore> = store.clone();
    let app = build_router(AppState::new(test_config(), StoreStatus::Ready(dyn_store)));
    (app, store)
}

pub fn router_with(status: StoreStatus) -> Router {
    build_router(AppState::new(test_config(), status))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    TestResponse {
        status,
        headers,
        body: body.to_vec(),
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    pub async fn spawn(store: StoreStatus) -> Self {
        let app = Application::build_with_store(test_config(), store)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, port }
    }
}
