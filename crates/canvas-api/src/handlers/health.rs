//! Liveness handlers.

use axum::Json;
use chrono::Utc;
use serde::Serialize;

/// Root liveness string, kept for clients that probe `GET /`.
pub async fn root() -> &'static str {
    "CareerCanvas server is running"
}

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Health check endpoint (liveness probe).
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
