use axum::Json;
use serde_json::{json, Value};

/// GET /ping
/// Liveness check. Always ready, even when the model failed to load.
pub async fn ping_handler() -> Json<Value> {
    Json(json!({ "status": "ready" }))
}
