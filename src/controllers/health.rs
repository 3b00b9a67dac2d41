use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::domain::news::CategoryKey;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Static readiness report. The news provider is not probed.
pub async fn health_ready() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "provider": "configured",
            "categories": CategoryKey::ALL.len()
        })),
    )
}
