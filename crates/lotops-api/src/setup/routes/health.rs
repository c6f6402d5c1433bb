//! Liveness, readiness and health probes.

use crate::state::AppState;
use axum::{http::StatusCode, response::IntoResponse, Json};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

/// Probes answer within this window or report a timeout.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// One round trip to Postgres. `Err` carries the reason text.
async fn probe_database(pool: &PgPool) -> Result<(), String> {
    match tokio::time::timeout(PROBE_TIMEOUT, sqlx::query("SELECT 1").execute(pool)).await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err("timed out".to_string()),
    }
}

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: String,
    pub database: String,
}

/// Process-is-up probe; never touches dependencies.
pub async fn liveness_check(_state: Arc<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness gates on the database; load balancers pull the instance on 503.
pub async fn readiness_check(state: Arc<AppState>) -> impl IntoResponse {
    match probe_database(&state.db.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "ready", "database": "ready" })),
        ),
        Err(reason) => {
            tracing::error!(reason = %reason, "Readiness probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "status": "not_ready",
                    "database": format!("not_ready: {}", reason),
                })),
            )
        }
    }
}

/// Health summary for dashboards and uptime monitors.
pub async fn health_check(state: Arc<AppState>) -> impl IntoResponse {
    let (status_code, status, database) = match probe_database(&state.db.pool).await {
        Ok(()) => (StatusCode::OK, "healthy", "healthy".to_string()),
        Err(reason) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "unhealthy",
            format!("unhealthy: {}", reason),
        ),
    };

    (
        status_code,
        Json(HealthCheckResponse {
            status: status.to_string(),
            database,
        }),
    )
}
