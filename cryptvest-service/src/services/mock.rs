//! In-memory `DocumentStore` used by the test suites in place of MongoDB.

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::store::{DocumentStore, PersistenceError};
use crate::models::EntityKind;

pub struct MockStore {
    database: String,
    documents: Mutex<HashMap<EntityKind, Vec<Document>>>,
    attempts: AtomicUsize,
    extra_collections: Vec<String>,
    insert_failure: Option<PersistenceError>,
    list_failure: Option<PersistenceError>,
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            database: "mock".to_string(),
            documents: Mutex::new(HashMap::new()),
            attempts: AtomicUsize::new(0),
            extra_collections: Vec::new(),
            insert_failure: None,
            list_failure: None,
        }
    }

    /// Every insert fails with `err`.
    pub fn failing_inserts(mut self, err: PersistenceError) -> Self {
        self.insert_failure = Some(err);
        self
    }

    /// Collection listing fails with `err`.
    pub fn failing_listing(mut self, err: PersistenceError) -> Self {
        self.list_failure = Some(err);
        self
    }

    /// Collections reported in addition to the ones holding documents.
    pub fn with_collections<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_collections = names.into_iter().map(Into::into).collect();
        self
    }

    /// Number of inserts that reached the store, failed ones included.
    pub fn insert_attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn documents(&self, entity: EntityKind) -> Vec<Document> {
        self.documents
            .lock()
            .map(|docs| docs.get(&entity).cloned().unwrap_or_default())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for MockStore {
    async fn insert_document(
        &self,
        entity: EntityKind,
        mut document: Document,
    ) -> Result<String, PersistenceError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.insert_failure {
            return Err(err.clone());
        }

        let id = ObjectId::new();
        document.insert("_id", id);
        self.documents
            .lock()
            .map_err(|e| PersistenceError::Unavailable(format!("Mock store mutex poisoned: {}", e)))?
            .entry(entity)
            .or_default()
            .push(document);
        Ok(id.to_hex())
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, PersistenceError> {
        if let Some(err) = &self.list_failure {
            return Err(err.clone());
        }

        let mut names: Vec<String> = self
            .documents
            .lock()
            .map_err(|e| PersistenceError::Unavailable(format!("Mock store mutex poisoned: {}", e)))?
            .keys()
            .map(|entity| entity.collection().to_string())
            .collect();
        names.extend(self.extra_collections.iter().cloned());
        names.sort();
        Ok(names)
    }

    async fn health_check(&self) -> Result<(), PersistenceError> {
        match &self.list_failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn database_name(&self) -> &str {
        &self.database
    }

    async fn shutdown(&self) {}
}
