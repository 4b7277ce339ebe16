use async_trait::async_trait;
use mongodb::bson::Document;
use service_core::error::AppError;
use std::sync::Arc;
use thiserror::Error;

use crate::models::EntityKind;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PersistenceError {
    #[error("Database not available: no store has been initialized")]
    NotConfigured,

    #[error("Database unreachable: {0}")]
    Unavailable(String),

    #[error("Database rejected the write: {0}")]
    Rejected(String),

    #[error("Malformed acknowledgment from database: {0}")]
    MalformedAcknowledgment(String),

    #[error("Failed to encode document: {0}")]
    Serialization(String),
}

impl From<PersistenceError> for AppError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotConfigured | PersistenceError::Unavailable(_) => {
                AppError::ServiceUnavailable(err.to_string())
            }
            PersistenceError::Rejected(_) | PersistenceError::MalformedAcknowledgment(_) => {
                AppError::BadGateway(err.to_string())
            }
            PersistenceError::Serialization(_) => AppError::InternalError(anyhow::Error::new(err)),
        }
    }
}

/// The backing document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts one document into the entity's collection and returns its new id.
    async fn insert_document(
        &self,
        entity: EntityKind,
        document: Document,
    ) -> Result<String, PersistenceError>;
    async fn list_collection_names(&self) -> Result<Vec<String>, PersistenceError>;
    async fn health_check(&self) -> Result<(), PersistenceError>;
    fn database_name(&self) -> &str;
    /// Releases connections. The store must not be used afterwards.
    async fn shutdown(&self);
}

/// What startup managed to do about the store.
#[derive(Clone)]
pub enum StoreStatus {
    Ready(Arc<dyn DocumentStore>),
    /// Connection settings were not provided.
    Unconfigured,
    /// Settings were provided but the client could not be built.
    Failed(String),
}

impl StoreStatus {
    pub fn ready(store: impl DocumentStore + 'static) -> Self {
        StoreStatus::Ready(Arc::new(store))
    }

    pub fn store(&self) -> Result<Arc<dyn DocumentStore>, PersistenceError> {
        match self {
            StoreStatus::Ready(store) => Ok(store.clone()),
            StoreStatus::Unconfigured | StoreStatus::Failed(_) => {
                Err(PersistenceError::NotConfigured)
            }
        }
    }

    pub async fn shutdown(&self) {
        if let StoreStatus::Ready(store) = self {
            store.shutdown().await;
        }
    }
}

impl std::fmt::Debug for StoreStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreStatus::Ready(store) => write!(f, "Ready({})", store.database_name()),
            StoreStatus::Unconfigured => write!(f, "Unconfigured"),
            StoreStatus::Failed(e) => write!(f, "Failed({})", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use service_core::axum::http::StatusCode;

    #[test]
    fn test_persistence_errors_map_to_distinct_statuses() {
        let cases = [
            (PersistenceError::NotConfigured, StatusCode::SERVICE_UNAVAILABLE),
            (
                PersistenceError::Unavailable("timeout".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                PersistenceError::Rejected("duplicate key".into()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                PersistenceError::MalformedAcknowledgment("no id".into()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                PersistenceError::Serialization("bad".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_unconfigured_store_is_not_available() {
        assert_eq!(
            StoreStatus::Unconfigured.store().err(),
            Some(PersistenceError::NotConfigured)
        );
        assert!(StoreStatus::Failed("bad uri".into()).store().is_err());
    }
}
