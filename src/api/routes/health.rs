//! Health route
//!
//! Unauthenticated liveness probe covering the database and Redis.

use crate::api::error::ApiError;
use crate::api::response::ApiResponse;
use crate::api::state::AppState;
use crate::database::connection;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// GET /health — service liveness
async fn health(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let database_healthy = connection::health_check(&state.pool).await.is_ok();
    let services = state.services.health_check().await;

    let body = serde_json::json!({
        "database": database_healthy,
        "redis": services.redis_healthy,
        "sms_live": services.sms_live,
    });

    Ok(Json(ApiResponse::ok(body)))
}
