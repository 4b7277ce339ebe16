//! Read-only status report for the `/test` endpoint.
//!
//! Every failure is folded into the snapshot text; nothing here returns an error.

use serde::Serialize;

use super::store::StoreStatus;
use crate::config::DatabaseConfig;

const MAX_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticSnapshot {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// Which connection settings were supplied. Values are never carried.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigPresence {
    pub database_url: bool,
    pub database_name: bool,
}

impl From<&DatabaseConfig> for ConfigPresence {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            database_url: config.url.is_some(),
            database_name: config.name.is_some(),
        }
    }
}

pub async fn collect_snapshot(store: &StoreStatus, presence: ConfigPresence) -> DiagnosticSnapshot {
    let mut snapshot = DiagnosticSnapshot {
        backend: "✅ Running".to_string(),
        database: "❌ Not Available".to_string(),
        database_url: set_or_not(presence.database_url),
        database_name: set_or_not(presence.database_name),
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    match store {
        StoreStatus::Unconfigured => {
            snapshot.database = "⚠️  Available but not initialized".to_string();
        }
        StoreStatus::Failed(err) => {
            snapshot.database = format!("❌ Error: {}", truncate_chars(err, MAX_ERROR_CHARS));
        }
        StoreStatus::Ready(store) => {
            snapshot.database = "✅ Available".to_string();
            snapshot.connection_status = "Connected".to_string();
            match store.list_collection_names().await {
                Ok(names) => {
                    snapshot.collections = names.into_iter().take(MAX_COLLECTIONS).collect();
                    snapshot.database = "✅ Connected & Working".to_string();
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Diagnostics could not list collections");
                    snapshot.database = format!(
                        "⚠️  Connected but Error: {}",
                        truncate_chars(&e.to_string(), MAX_ERROR_CHARS)
                    );
                }
            }
        }
    }

    snapshot
}

fn set_or_not(present: bool) -> String {
    let text = if present { "✅ Set" } else { "❌ Not Set" };
    text.to_string()
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
