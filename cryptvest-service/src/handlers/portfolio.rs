use axum::Json;

use crate::models::DemoPortfolio;

pub async fn demo_portfolio() -> Json<DemoPortfolio> {
    Json(DemoPortfolio::sample())
}
