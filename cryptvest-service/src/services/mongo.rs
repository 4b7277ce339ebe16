use async_trait::async_trait;
use mongodb::{
    bson::{doc, Bson, Document},
    error::{Error as MongoError, ErrorKind},
    options::ClientOptions,
    Client as MongoClient, Database,
};
use std::time::Duration;

use super::store::{DocumentStore, PersistenceError};
use crate::models::EntityKind;

impl From<MongoError> for PersistenceError {
    fn from(err: MongoError) -> Self {
        match err.kind.as_ref() {
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::ConnectionPoolCleared { .. }
            | ErrorKind::DnsResolve { .. } => PersistenceError::Unavailable(err.to_string()),
            ErrorKind::InvalidResponse { .. } => {
                PersistenceError::MalformedAcknowledgment(err.to_string())
            }
            ErrorKind::BsonSerialization(_) => PersistenceError::Serialization(err.to_string()),
            _ => PersistenceError::Rejected(err.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct MongoStore {
    client: MongoClient,
    db: Database,
}

impl MongoStore {
    /// Builds the client. The driver connects lazily, so an unreachable
    /// server surfaces on the first operation rather than here.
    pub async fn connect(
        uri: &str,
        database: &str,
        server_selection_timeout: Duration,
    ) -> Result<Self, PersistenceError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let mut options = ClientOptions::parse(uri).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse MongoDB connection string");
            PersistenceError::from(e)
        })?;
        options.app_name = Some("cryptvest-service".to_string());
        options.server_selection_timeout = Some(server_selection_timeout);

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!(error = %e, "Failed to build MongoDB client");
            PersistenceError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "MongoDB client ready");
        Ok(Self { client, db })
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert_document(
        &self,
        entity: EntityKind,
        document: Document,
    ) -> Result<String, PersistenceError> {
        let result = self
            .db
            .collection::<Document>(entity.collection())
            .insert_one(document, None)
            .await
            .map_err(|e| {
                tracing::error!(entity = %entity, error = %e, "Failed to insert document");
                PersistenceError::from(e)
            })?;

        match result.inserted_id {
            Bson::ObjectId(oid) => Ok(oid.to_hex()),
            Bson::String(id) if !id.is_empty() => Ok(id),
            other => Err(PersistenceError::MalformedAcknowledgment(format!(
                "unexpected inserted id {:?}",
                other
            ))),
        }
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, PersistenceError> {
        self.db.list_collection_names(None).await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to list MongoDB collections");
            PersistenceError::from(e)
        })
    }

    async fn health_check(&self) -> Result<(), PersistenceError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                PersistenceError::from(e)
            })?;
        Ok(())
    }

    fn database_name(&self) -> &str {
        self.db.name()
    }

    async fn shutdown(&self) {
        tracing::info!("Closing MongoDB client");
        self.client.clone().shutdown().await;
    }
}
