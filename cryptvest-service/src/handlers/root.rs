use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub async fn read_root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from FastAPI Backend!",
    })
}

pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from the backend API!",
    })
}
