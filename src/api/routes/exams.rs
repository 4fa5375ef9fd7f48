//! Exam routes
//!
//! Owner-side exam assignment and results, plus the manager-side
//! start/complete flow under `/my`.

use crate::api::error::ApiError;
use crate::api::extract::Pagination;
use crate::api::response::{ApiResponse, Paginated};
use crate::api::state::AppState;
use crate::models::exam::{AssignExamRequest, Exam, ExamResult};
use crate::models::user::UserRole;
use crate::services::auth::AuthContext;
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ExamCompletion {
    pub score: i32,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/exams", get(list_exams))
        .route("/exam-assignments", post(assign_exam))
        .route("/exam-results", get(list_exam_results))
        .route("/my/exams", get(my_exams))
        .route("/my/exams/{id}/start", post(start_exam))
        .route("/my/exams/{id}/complete", post(complete_exam))
}

/// GET /exams — browse the exam catalog (owner)
async fn list_exams(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<Paginated<Exam>>>, ApiError> {
    context.require_role(UserRole::Owner)?;

    let items = state.services.exam_service
        .list_exams(pagination.per_page(), pagination.offset())
        .await?;
    let total = state.services.exam_service.count_exams().await?;

    Ok(Json(ApiResponse::ok(Paginated::new(items, total, pagination.page(), pagination.per_page()))))
}

/// POST /exam-assignments — assign an exam to a manager
async fn assign_exam(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Json(request): Json<AssignExamRequest>,
) -> Result<Json<ApiResponse<ExamResult>>, ApiError> {
    context.require_role(UserRole::Owner)?;
    let company_id = context.require_company()?;

    let result = state.services.exam_service
        .assign(company_id, context.user_id, request)
        .await?;

    Ok(Json(ApiResponse::ok(result)))
}

/// GET /exam-results — company-wide exam results
async fn list_exam_results(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<Paginated<ExamResult>>>, ApiError> {
    context.require_role(UserRole::Owner)?;
    let company_id = context.require_company()?;

    let items = state.services.exam_service
        .list_results_for_company(company_id, pagination.per_page(), pagination.offset())
        .await?;
    let total = state.services.exam_service.count_results_for_company(company_id).await?;

    Ok(Json(ApiResponse::ok(Paginated::new(items, total, pagination.page(), pagination.per_page()))))
}

/// GET /my/exams — the signed-in manager's exam assignments
async fn my_exams(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> Result<Json<ApiResponse<Vec<ExamResult>>>, ApiError> {
    context.require_role(UserRole::Manager)?;

    let results = state.services.exam_service.list_for_manager_user(context.user_id).await?;

    Ok(Json(ApiResponse::ok(results)))
}

/// POST /my/exams/{id}/start — start an assigned exam
async fn start_exam(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(result_id): Path<i64>,
) -> Result<Json<ApiResponse<ExamResult>>, ApiError> {
    context.require_role(UserRole::Manager)?;

    let result = state.services.exam_service.start(context.user_id, result_id).await?;

    Ok(Json(ApiResponse::ok(result)))
}

/// POST /my/exams/{id}/complete — complete a started exam
async fn complete_exam(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(result_id): Path<i64>,
    Json(completion): Json<ExamCompletion>,
) -> Result<Json<ApiResponse<ExamResult>>, ApiError> {
    context.require_role(UserRole::Manager)?;

    let result = state.services.exam_service
        .complete(context.user_id, result_id, completion.score)
        .await?;

    Ok(Json(ApiResponse::ok(result)))
}
