use axum::Json;
use serde_json::{json, Value};

/// GET /api/health
/// Liveness check; touches no collaborator.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "Tradesmatch API is running",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
