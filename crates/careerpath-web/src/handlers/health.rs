//! Liveness probe and the JSON 404 fallback.

use axum::Json;
use serde_json::{json, Value};

use crate::error::ApiError;

/// GET /health — constant, independent of artifact state
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
