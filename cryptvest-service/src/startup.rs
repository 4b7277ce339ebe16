//! Application startup and lifecycle management.

use axum::{
    http::HeaderValue,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use secrecy::ExposeSecret;
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    security_headers::security_headers_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowHeaders, AllowMethods, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{CorsConfig, ServiceConfig};
use crate::handlers;
use crate::services::{DocumentStore, DocumentWriter, MongoStore, PersistenceError, StoreStatus};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ServiceConfig,
    pub store: StoreStatus,
}

impl AppState {
    pub fn new(config: ServiceConfig, store: StoreStatus) -> Self {
        Self { config, store }
    }

    pub fn writer(&self) -> Result<DocumentWriter, PersistenceError> {
        self.store.store().map(DocumentWriter::new)
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    Router::new()
        .route("/", get(handlers::read_root))
        .route("/api/hello", get(handlers::hello))
        .route("/test", get(handlers::test_database))
        .route("/leads", post(handlers::create_lead))
        .route("/connect", post(handlers::create_connection))
        .route("/api/demo-portfolio", get(handlers::demo_portfolio))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route_layer(from_fn(metrics_middleware))
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<axum::body::Body>))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("Invalid CORS origin '{}': {}. Skipping.", o, e);
                None
            }
        })
        .collect();

    // Credentials forbid wildcards, so methods and headers echo the preflight.
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Builds the store client from configuration. Never fails: problems are
/// kept in the returned status and surfaced through diagnostics.
pub async fn connect_store(config: &ServiceConfig) -> StoreStatus {
    let (url, name) = match (&config.database.url, &config.database.name) {
        (Some(url), Some(name)) => (url, name),
        _ => {
            tracing::warn!("DATABASE_URL or DATABASE_NAME not set; running without a database");
            return StoreStatus::Unconfigured;
        }
    };

    match MongoStore::connect(
        url.expose_secret(),
        name,
        config.database.server_selection_timeout(),
    )
    .await
    {
        Ok(store) => {
            if let Err(e) = store.health_check().await {
                tracing::warn!(error = %e, "MongoDB not reachable yet; continuing");
            }
            StoreStatus::ready(store)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize MongoDB client");
            StoreStatus::Failed(e.to_string())
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application, connecting the store described by `config`.
    pub async fn build(config: ServiceConfig) -> Result<Self, AppError> {
        let store = connect_store(&config).await;
        Self::build_with_store(config, store).await
    }

    /// Build the application around an already constructed store.
    pub async fn build_with_store(
        config: ServiceConfig,
        store: StoreStatus,
    ) -> Result<Self, AppError> {
        // Port 0 picks a random port, used by tests.
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(store = ?store, "cryptvest-service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState::new(config, store),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until SIGINT/SIGTERM, then release the store client.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let store = self.state.store.clone();
        let router = build_router(self.state);

        let result = axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await;

        store.shutdown().await;

        result.map_err(|e| {
            tracing::error!("HTTP server error: {}", e);
            std::io::Error::other(format!("HTTP server error: {}", e))
        })
    }
}
