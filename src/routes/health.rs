use axum::Json;
use serde::Serialize;

use crate::services::corrections;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Number of compiled-in correction rules across all categories.
    pub correction_rules: usize,
}

/// GET /health: liveness plus a sanity check that the correction tables loaded.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        correction_rules: corrections::rule_count(),
    })
}
