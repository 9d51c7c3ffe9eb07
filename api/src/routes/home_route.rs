//! GET / — liveness probe.

use axum::Json;
use serde_json::{Value, json};

/// Fixed liveness message, independent of provider configuration.
pub async fn home() -> Json<Value> {
    Json(json!({ "message": "Perplex-Mini Backend is Running!" }))
}
