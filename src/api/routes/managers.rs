//! Manager routes (owner role)
//!
//! CRUD and search over a company's applicants/employees.

use crate::api::error::ApiError;
use crate::api::extract::Pagination;
use crate::api::response::{ApiResponse, Paginated};
use crate::api::state::AppState;
use crate::models::assessment::Assessment;
use crate::models::manager::{CreateManagerRequest, Manager, UpdateManagerRequest};
use crate::models::user::UserRole;
use crate::services::auth::AuthContext;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/managers", get(list_managers).post(create_manager))
        .route("/managers/search", get(search_managers))
        .route("/managers/stats", get(manager_stats))
        .route(
            "/managers/{id}",
            get(get_manager).put(update_manager).delete(delete_manager),
        )
        .route("/managers/{id}/assessments", get(manager_assessments))
}

/// GET /managers — list the company's managers
async fn list_managers(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<Paginated<Manager>>>, ApiError> {
    context.require_role(UserRole::Owner)?;
    let company_id = context.require_company()?;

    let items = state.services.manager_service
        .list_managers(company_id, pagination.per_page(), pagination.offset())
        .await?;
    let total = state.services.manager_service.count_managers(company_id).await?;

    Ok(Json(ApiResponse::ok(Paginated::new(items, total, pagination.page(), pagination.per_page()))))
}

/// POST /managers — create a manager
async fn create_manager(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Json(request): Json<CreateManagerRequest>,
) -> Result<Json<ApiResponse<Manager>>, ApiError> {
    context.require_role(UserRole::Owner)?;
    let company_id = context.require_company()?;

    let manager = state.services.manager_service.create_manager(company_id, request).await?;

    Ok(Json(ApiResponse::ok(manager)))
}

/// GET /managers/search?q= — search by name or phone
async fn search_managers(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<Manager>>>, ApiError> {
    context.require_role(UserRole::Owner)?;
    let company_id = context.require_company()?;

    let managers = state.services.manager_service.search_managers(company_id, &query.q).await?;

    Ok(Json(ApiResponse::ok(managers)))
}

/// GET /managers/stats — headcount statistics
async fn manager_stats(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> Result<Json<ApiResponse<HashMap<String, i64>>>, ApiError> {
    context.require_role(UserRole::Owner)?;
    let company_id = context.require_company()?;

    let stats = state.services.manager_service.get_statistics(company_id).await?;

    Ok(Json(ApiResponse::ok(stats)))
}

/// GET /managers/{id} — one manager
async fn get_manager(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(manager_id): Path<i64>,
) -> Result<Json<ApiResponse<Manager>>, ApiError> {
    context.require_role(UserRole::Owner)?;
    let company_id = context.require_company()?;

    let manager = state.services.manager_service.get_manager(company_id, manager_id).await?;

    Ok(Json(ApiResponse::ok(manager)))
}

/// PUT /managers/{id} — update a manager
async fn update_manager(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(manager_id): Path<i64>,
    Json(request): Json<UpdateManagerRequest>,
) -> Result<Json<ApiResponse<Manager>>, ApiError> {
    context.require_role(UserRole::Owner)?;
    let company_id = context.require_company()?;

    let manager = state.services.manager_service.update_manager(company_id, manager_id, request).await?;

    Ok(Json(ApiResponse::ok(manager)))
}

/// DELETE /managers/{id} — delete or archive a manager
async fn delete_manager(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(manager_id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    context.require_role(UserRole::Owner)?;
    let company_id = context.require_company()?;

    state.services.manager_service.remove_manager(company_id, manager_id).await?;

    Ok(Json(ApiResponse::empty()))
}

/// GET /managers/{id}/assessments — a manager's assessment history
async fn manager_assessments(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(manager_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<Assessment>>>, ApiError> {
    context.require_role(UserRole::Owner)?;
    let company_id = context.require_company()?;

    let assessments = state.services.assessment_service.list_for_manager(company_id, manager_id).await?;

    Ok(Json(ApiResponse::ok(assessments)))
}
