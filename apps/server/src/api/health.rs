use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::main_lib::AppState;

/// Liveness probe.
async fn get_health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "stakelens-server",
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}
