use mongodb::bson::{self, DateTime as BsonDateTime, Document};
use serde::Serialize;
use std::sync::Arc;

use super::schema::Schema;
use super::store::{DocumentStore, PersistenceError};
use crate::models::{ConnectionRequest, Lead};

/// Persists validated records, one typed entry point per entity.
#[derive(Clone)]
pub struct DocumentWriter {
    store: Arc<dyn DocumentStore>,
}

impl DocumentWriter {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn create_lead(&self, lead: &Lead) -> Result<String, PersistenceError> {
        self.insert(lead).await
    }

    pub async fn create_connection_request(
        &self,
        request: &ConnectionRequest,
    ) -> Result<String, PersistenceError> {
        self.insert(request).await
    }

    async fn insert<T: Schema + Serialize>(&self, record: &T) -> Result<String, PersistenceError> {
        let document = to_timestamped_document(record)?;
        let id = self.store.insert_document(T::ENTITY, document).await?;
        if id.is_empty() {
            return Err(PersistenceError::MalformedAcknowledgment(
                "store returned an empty id".to_string(),
            ));
        }
        tracing::info!(entity = %T::ENTITY, id = %id, "Document created");
        Ok(id)
    }
}

fn to_timestamped_document<T: Serialize>(record: &T) -> Result<Document, PersistenceError> {
    let mut document =
        bson::to_document(record).map_err(|e| PersistenceError::Serialization(e.to_string()))?;
    let now = BsonDateTime::now();
    document.insert("created_at", now);
    document.insert("updated_at", now);
    Ok(document)
}
