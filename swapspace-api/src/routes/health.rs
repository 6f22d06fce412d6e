/// Liveness endpoints
///
/// # Endpoints
///
/// - `GET /` - plain text banner
/// - `GET /health` - JSON status including store connectivity
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "backend": "postgres",
///   "store": "connected"
/// }
/// ```

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,

    pub version: String,

    /// Active store backend ("memory" or "postgres")
    pub backend: String,

    /// "connected" or "disconnected"
    pub store: String,
}

pub async fn root() -> &'static str {
    "API running!"
}

/// Reports service health; a failed store ping degrades the status
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.items.store();

    let connected = match store.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, backend = store.backend(), "Store health check failed");
            false
        }
    };

    Json(HealthResponse {
        status: if connected { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: store.backend().to_string(),
        store: if connected { "connected" } else { "disconnected" }.to_string(),
    })
}
