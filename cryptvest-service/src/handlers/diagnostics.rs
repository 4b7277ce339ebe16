use axum::{extract::State, Json};

use crate::services::{collect_snapshot, ConfigPresence, DiagnosticSnapshot};
use crate::startup::AppState;

/// Reports backend and database status. Always answers 200.
#[tracing::instrument(skip(state))]
pub async fn test_database(State(state): State<AppState>) -> Json<DiagnosticSnapshot> {
    let presence = ConfigPresence::from(&state.config.database);
    Json(collect_snapshot(&state.store, presence).await)
}
