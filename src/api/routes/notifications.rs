//! Notification routes (any authenticated role)
//!
//! Poll-based in-app notifications: listing, unread counter and
//! read receipts.

use crate::api::error::ApiError;
use crate::api::extract::Pagination;
use crate::api::response::ApiResponse;
use crate::api::state::AppState;
use crate::models::notification::Notification;
use crate::services::auth::AuthContext;
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/unread-count", get(unread_count))
        .route("/notifications/{id}/read", post(mark_read))
        .route("/notifications/read-all", post(mark_all_read))
}

/// GET /notifications — the caller's notifications
async fn list_notifications(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<Vec<Notification>>>, ApiError> {
    let notifications = state.services.notification_service
        .list(context.user_id, pagination.per_page(), pagination.offset())
        .await?;

    Ok(Json(ApiResponse::ok(notifications)))
}

/// GET /notifications/unread-count — cached unread counter
async fn unread_count(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let count = state.services.notification_service.unread_count(context.user_id).await?;

    Ok(Json(ApiResponse::ok(serde_json::json!({ "unread": count }))))
}

/// POST /notifications/{id}/read — mark one notification read
async fn mark_read(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(notification_id): Path<i64>,
) -> Result<Json<ApiResponse<Notification>>, ApiError> {
    let notification = state.services.notification_service
        .mark_read(context.user_id, notification_id)
        .await?;

    Ok(Json(ApiResponse::ok(notification)))
}

/// POST /notifications/read-all — mark everything read
async fn mark_all_read(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let updated = state.services.notification_service.mark_all_read(context.user_id).await?;

    Ok(Json(ApiResponse::ok(serde_json::json!({ "updated": updated }))))
}
