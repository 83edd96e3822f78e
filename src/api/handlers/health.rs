use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde_json::json;

use crate::db;
use crate::AppState;

/// GET /health: liveness plus dependency checks. Only the database can
/// make the service unhealthy; the cache is optional by nature.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = match &state.db {
        Some(pool) => {
            if db::ping(pool).await.is_ok() {
                "connected"
            } else {
                "disconnected"
            }
        }
        None => "not_configured",
    };

    let cache = match state.prices.cache() {
        Some(cache) => match cache.ping().await {
            Ok(()) => "connected",
            Err(e) => {
                tracing::warn!(error = %e, "Cache health check failed");
                "disconnected"
            }
        },
        None => "not_configured",
    };

    let healthy = database != "disconnected";
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if healthy { "healthy" } else { "unhealthy" },
            "timestamp": Utc::now(),
            "checks": {
                "database": database,
                "cache": cache,
            },
        })),
    )
}
