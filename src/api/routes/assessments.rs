//! Assessment routes
//!
//! Owner-side template management and assignment, plus the manager-side
//! step submission flow under `/my`.

use crate::api::error::ApiError;
use crate::api::extract::Pagination;
use crate::api::response::{ApiResponse, Paginated};
use crate::api::state::AppState;
use crate::models::assessment::{
    Assessment, AssessmentTemplate, AssignAssessmentRequest, CreateTemplateRequest,
    UpdateTemplateRequest,
};
use crate::models::user::UserRole;
use crate::services::auth::AuthContext;
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct StepSubmission {
    pub answers: Vec<serde_json::Value>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/assessment-templates",
            get(list_templates).post(create_template),
        )
        .route(
            "/assessment-templates/{id}",
            get(get_template).put(update_template).delete(delete_template),
        )
        .route("/assessments", get(list_assessments).post(assign_assessment))
        .route("/assessments/{id}", get(get_assessment))
        .route("/my/assessments", get(my_assessments))
        .route("/my/assessments/{id}/steps/{step}", post(submit_step))
}

/// GET /assessment-templates — templates visible to the company
async fn list_templates(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<Paginated<AssessmentTemplate>>>, ApiError> {
    context.require_role(UserRole::Owner)?;
    let company_id = context.require_company()?;

    let items = state.services.assessment_service
        .list_templates(company_id, pagination.per_page(), pagination.offset())
        .await?;
    let total = state.services.assessment_service.count_templates(company_id).await?;

    Ok(Json(ApiResponse::ok(Paginated::new(items, total, pagination.page(), pagination.per_page()))))
}

/// POST /assessment-templates — create a template
async fn create_template(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Json(request): Json<CreateTemplateRequest>,
) -> Result<Json<ApiResponse<AssessmentTemplate>>, ApiError> {
    context.require_role(UserRole::Owner)?;
    let company_id = context.require_company()?;

    let template = state.services.assessment_service.create_template(company_id, request).await?;

    Ok(Json(ApiResponse::ok(template)))
}

/// GET /assessment-templates/{id} — one template
async fn get_template(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(template_id): Path<i64>,
) -> Result<Json<ApiResponse<AssessmentTemplate>>, ApiError> {
    context.require_role(UserRole::Owner)?;
    let company_id = context.require_company()?;

    let template = state.services.assessment_service.get_template(company_id, template_id).await?;

    Ok(Json(ApiResponse::ok(template)))
}

/// PUT /assessment-templates/{id} — update a template
async fn update_template(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(template_id): Path<i64>,
    Json(request): Json<UpdateTemplateRequest>,
) -> Result<Json<ApiResponse<AssessmentTemplate>>, ApiError> {
    context.require_role(UserRole::Owner)?;
    let company_id = context.require_company()?;

    let template = state.services.assessment_service
        .update_template(company_id, template_id, request)
        .await?;

    Ok(Json(ApiResponse::ok(template)))
}

/// DELETE /assessment-templates/{id} — delete a template
async fn delete_template(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(template_id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    context.require_role(UserRole::Owner)?;
    let company_id = context.require_company()?;

    state.services.assessment_service.delete_template(company_id, template_id).await?;

    Ok(Json(ApiResponse::empty()))
}

/// GET /assessments — company-wide assignment list
async fn list_assessments(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<Paginated<Assessment>>>, ApiError> {
    context.require_role(UserRole::Owner)?;
    let company_id = context.require_company()?;

    let items = state.services.assessment_service
        .list_for_company(company_id, pagination.per_page(), pagination.offset())
        .await?;
    let total = state.services.assessment_service.count_for_company(company_id).await?;

    Ok(Json(ApiResponse::ok(Paginated::new(items, total, pagination.page(), pagination.per_page()))))
}

/// POST /assessments — assign a template to a manager
async fn assign_assessment(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Json(request): Json<AssignAssessmentRequest>,
) -> Result<Json<ApiResponse<Assessment>>, ApiError> {
    context.require_role(UserRole::Owner)?;
    let company_id = context.require_company()?;

    let assessment = state.services.assessment_service
        .assign(company_id, context.user_id, request)
        .await?;

    Ok(Json(ApiResponse::ok(assessment)))
}

/// GET /assessments/{id} — one assignment
async fn get_assessment(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(assessment_id): Path<i64>,
) -> Result<Json<ApiResponse<Assessment>>, ApiError> {
    context.require_role(UserRole::Owner)?;
    let company_id = context.require_company()?;

    let assessment = state.services.assessment_service.get_assessment(company_id, assessment_id).await?;

    Ok(Json(ApiResponse::ok(assessment)))
}

/// GET /my/assessments — the signed-in manager's assignments
async fn my_assessments(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> Result<Json<ApiResponse<Vec<Assessment>>>, ApiError> {
    context.require_role(UserRole::Manager)?;

    let assessments = state.services.assessment_service
        .list_for_manager_user(context.user_id)
        .await?;

    Ok(Json(ApiResponse::ok(assessments)))
}

/// POST /my/assessments/{id}/steps/{step} — submit one step's answers
async fn submit_step(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path((assessment_id, step)): Path<(i64, usize)>,
    Json(submission): Json<StepSubmission>,
) -> Result<Json<ApiResponse<Assessment>>, ApiError> {
    context.require_role(UserRole::Manager)?;

    let assessment = state.services.assessment_service
        .submit_step(context.user_id, assessment_id, step, submission.answers)
        .await?;

    Ok(Json(ApiResponse::ok(assessment)))
}
