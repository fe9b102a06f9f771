//! Health check endpoint handlers.
//!
//! The storage check talks to the connection pool directly instead of
//! going through a service, so it measures connectivity only.

use std::collections::HashMap;
use std::time::Instant;

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus};
use crate::state::AppState;

/// # Routes
/// - `GET /health` - Full health report
/// - `GET /health/ready` - Readiness probe
/// - `GET /health/live` - Liveness probe
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(readiness_check))
        .routes(routes!(liveness_check))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let storage = check_storage(&state).await;
    let status = HealthStatus::Healthy.combine(storage.status);

    let mut checks = HashMap::new();
    checks.insert("storage".to_string(), storage);

    let response = HealthResponse {
        status,
        version: crate::pkg_version().to_string(),
        timestamp: jiff::Timestamp::now().to_string(),
        checks,
    };

    let code = match status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (code, Json(response))
}

#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Service is ready"),
        (status = 503, description = "Service is not ready")
    ),
    tag = HEALTH_TAG
)]
pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    match check_storage(&state).await.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded | HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Does not touch storage; answering at all means the process is alive.
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive")
    ),
    tag = HEALTH_TAG
)]
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

async fn check_storage(state: &AppState) -> ComponentHealth {
    let Some(pool) = &state.db_pool else {
        return ComponentHealth {
            status: HealthStatus::Healthy,
            message: Some("In-memory store".to_string()),
            response_time_ms: Some(0),
        };
    };

    let start_time = Instant::now();
    let elapsed = |start: Instant| Some(start.elapsed().as_millis() as u64);

    match pool.get().await {
        Ok(mut conn) => {
            use diesel_async::RunQueryDsl;

            match diesel::sql_query("SELECT 1").execute(&mut conn).await {
                Ok(_) => ComponentHealth {
                    status: HealthStatus::Healthy,
                    message: Some("Connected".to_string()),
                    response_time_ms: elapsed(start_time),
                },
                Err(e) => ComponentHealth {
                    status: HealthStatus::Unhealthy,
                    message: Some(format!("Query failed: {}", e)),
                    response_time_ms: elapsed(start_time),
                },
            }
        }
        Err(e) => ComponentHealth {
            status: HealthStatus::Unhealthy,
            message: Some(format!("Connection failed: {}", e)),
            response_time_ms: elapsed(start_time),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness_check() {
        assert_eq!(liveness_check().await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_in_memory_storage_is_healthy() {
        let state = AppState::in_memory();

        let (code, Json(response)) = health_check(State(state.clone())).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(response.status, HealthStatus::Healthy);
        assert_eq!(
            response.checks["storage"].message.as_deref(),
            Some("In-memory store")
        );

        assert_eq!(readiness_check(State(state)).await, StatusCode::OK);
    }
}
