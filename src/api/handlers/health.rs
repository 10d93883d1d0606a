use axum::Json;
use serde_json::{json, Value};

/// Root greeting
///
/// GET /
pub async fn welcome() -> Json<Value> {
    Json(json!({ "message": "welcome to job portal" }))
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
