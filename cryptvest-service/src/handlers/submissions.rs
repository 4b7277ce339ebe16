use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use service_core::error::AppError;

use crate::models::{ConnectionRequest, Lead};
use crate::services::{record_submission, validate_payload, PersistenceError, Schema};
use crate::startup::AppState;

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub status: &'static str,
    pub id: String,
}

impl CreatedResponse {
    fn ok(id: String) -> Self {
        Self { status: "ok", id }
    }
}

#[tracing::instrument(skip(state, body))]
pub async fn create_lead(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CreatedResponse>, AppError> {
    let lead: Lead = accept(&body)?;
    let result = match state.writer() {
        Ok(writer) => writer.create_lead(&lead).await,
        Err(e) => Err(e),
    };
    finish::<Lead>(result)
}

#[tracing::instrument(skip(state, body))]
pub async fn create_connection(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CreatedResponse>, AppError> {
    let request: ConnectionRequest = accept(&body)?;
    let result = match state.writer() {
        Ok(writer) => writer.create_connection_request(&request).await,
        Err(e) => Err(e),
    };
    finish::<ConnectionRequest>(result)
}

fn accept<T: Schema>(body: &[u8]) -> Result<T, AppError> {
    validate_payload::<T>(body).map_err(|report| {
        tracing::warn!(entity = %T::ENTITY, violations = %report, "Rejected invalid submission");
        record_submission(T::ENTITY, "invalid");
        AppError::from(report)
    })
}

fn finish<T: Schema>(
    result: Result<String, PersistenceError>,
) -> Result<Json<CreatedResponse>, AppError> {
    match result {
        Ok(id) => {
            record_submission(T::ENTITY, "created");
            Ok(Json(CreatedResponse::ok(id)))
        }
        Err(e) => {
            tracing::error!(entity = %T::ENTITY, error = %e, "Failed to persist submission");
            record_submission(T::ENTITY, "failed");
            Err(e.into())
        }
    }
}
