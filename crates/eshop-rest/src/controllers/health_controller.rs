//! Liveness and health endpoints. Neither touches the store or the cache.

use axum::{http::StatusCode, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Routes `/health` and `/live`.
pub fn router() -> Router {
    Router::new().route("/health", get(health)).route("/live", get(live))
}

async fn health() -> Json<HealthReport> {
    Json(HealthReport {
        status: HealthStatus::Healthy,
        service: "basket",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
    })
}

async fn live() -> StatusCode {
    StatusCode::OK
}
