use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde_json::json;

/// Liveness endpoint.
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
