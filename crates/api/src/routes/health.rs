use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::AppState;

pub fn health_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
}

/// Plain liveness text at the root, for quick manual checks.
async fn root() -> &'static str {
    "Backend API is up and running!"
}

/// Health check endpoint used by deploy checks and ops scripts.
async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
