//! Admin routes (admin role)
//!
//! Cross-tenant management: companies, the exam catalog, financial
//! documents and bills, the support inbox, and platform statistics.

use crate::api::error::ApiError;
use crate::api::extract::Pagination;
use crate::api::response::{ApiResponse, Paginated};
use crate::api::state::AppState;
use crate::models::billing::{Bill, CreateBillRequest, CreateDocumentRequest, FinancialDocument};
use crate::models::company::{Company, CreateCompanyRequest, UpdateCompanyRequest};
use crate::models::exam::{CreateExamRequest, Exam, UpdateExamRequest};
use crate::models::support::{SupportTicket, TicketStatus};
use crate::models::user::{User, UserRole};
use crate::services::auth::AuthContext;
use crate::services::company::OwnerAccountRequest;
use axum::extract::{Path, Query, State};
use axum::routing::{get, post, put};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateCompanyBody {
    #[serde(flatten)]
    pub company: CreateCompanyRequest,
    pub owner: Option<OwnerAccountRequest>,
}

#[derive(Debug, Serialize)]
pub struct CreatedCompany {
    pub company: Company,
    pub owner: Option<User>,
}

#[derive(Debug, Deserialize)]
pub struct TicketInboxQuery {
    pub status: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl TicketInboxQuery {
    fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page.unwrap_or(1),
            per_page: self.per_page.unwrap_or(20),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/companies", get(list_companies).post(create_company))
        .route("/admin/companies/{id}", get(get_company).put(update_company))
        .route("/admin/exams", get(list_exams).post(create_exam))
        .route(
            "/admin/exams/{id}",
            get(get_exam).put(update_exam).delete(delete_exam),
        )
        .route(
            "/admin/billing/documents",
            get(list_documents).post(issue_document),
        )
        .route("/admin/billing/bills", post(create_bill))
        .route("/admin/billing/bills/{id}/paid", put(mark_bill_paid))
        .route("/admin/support/tickets", get(ticket_inbox))
        .route("/admin/stats", get(stats))
}

// --- companies ---

/// GET /admin/companies — all companies
async fn list_companies(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<Paginated<Company>>>, ApiError> {
    context.require_role(UserRole::Admin)?;

    let items = state.services.company_service
        .list_companies(pagination.per_page(), pagination.offset())
        .await?;
    let total = state.services.company_service.count_companies().await?;

    Ok(Json(ApiResponse::ok(Paginated::new(items, total, pagination.page(), pagination.per_page()))))
}

/// POST /admin/companies — create a company, optionally with its owner
async fn create_company(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Json(body): Json<CreateCompanyBody>,
) -> Result<Json<ApiResponse<CreatedCompany>>, ApiError> {
    context.require_role(UserRole::Admin)?;

    let (company, owner) = state.services.company_service
        .create_company(body.company, body.owner)
        .await?;

    Ok(Json(ApiResponse::ok(CreatedCompany { company, owner })))
}

/// GET /admin/companies/{id} — one company
async fn get_company(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(company_id): Path<i64>,
) -> Result<Json<ApiResponse<Company>>, ApiError> {
    context.require_role(UserRole::Admin)?;

    let company = state.services.company_service.get_company(company_id).await?;

    Ok(Json(ApiResponse::ok(company)))
}

/// PUT /admin/companies/{id} — update a company
async fn update_company(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(company_id): Path<i64>,
    Json(request): Json<UpdateCompanyRequest>,
) -> Result<Json<ApiResponse<Company>>, ApiError> {
    context.require_role(UserRole::Admin)?;

    let company = state.services.company_service.update_company(company_id, request).await?;

    Ok(Json(ApiResponse::ok(company)))
}

// --- exam catalog ---

/// GET /admin/exams — the exam catalog
async fn list_exams(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<Paginated<Exam>>>, ApiError> {
    context.require_role(UserRole::Admin)?;

    let items = state.services.exam_service
        .list_exams(pagination.per_page(), pagination.offset())
        .await?;
    let total = state.services.exam_service.count_exams().await?;

    Ok(Json(ApiResponse::ok(Paginated::new(items, total, pagination.page(), pagination.per_page()))))
}

/// POST /admin/exams — add an exam
async fn create_exam(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Json(request): Json<CreateExamRequest>,
) -> Result<Json<ApiResponse<Exam>>, ApiError> {
    context.require_role(UserRole::Admin)?;

    let exam = state.services.exam_service.create_exam(request).await?;

    Ok(Json(ApiResponse::ok(exam)))
}

/// GET /admin/exams/{id} — one exam
async fn get_exam(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(exam_id): Path<i64>,
) -> Result<Json<ApiResponse<Exam>>, ApiError> {
    context.require_role(UserRole::Admin)?;

    let exam = state.services.exam_service.get_exam(exam_id).await?;

    Ok(Json(ApiResponse::ok(exam)))
}

/// PUT /admin/exams/{id} — update an exam
async fn update_exam(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(exam_id): Path<i64>,
    Json(request): Json<UpdateExamRequest>,
) -> Result<Json<ApiResponse<Exam>>, ApiError> {
    context.require_role(UserRole::Admin)?;

    let exam = state.services.exam_service.update_exam(exam_id, request).await?;

    Ok(Json(ApiResponse::ok(exam)))
}

/// DELETE /admin/exams/{id} — remove an exam
async fn delete_exam(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(exam_id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    context.require_role(UserRole::Admin)?;

    state.services.exam_service.delete_exam(exam_id).await?;

    Ok(Json(ApiResponse::empty()))
}

// --- billing ---

/// GET /admin/billing/documents — documents across all tenants
async fn list_documents(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<Vec<FinancialDocument>>>, ApiError> {
    context.require_role(UserRole::Admin)?;

    let documents = state.services.billing_service
        .list_all_documents(pagination.per_page(), pagination.offset())
        .await?;

    Ok(Json(ApiResponse::ok(documents)))
}

/// POST /admin/billing/documents — issue a document
async fn issue_document(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Json(request): Json<CreateDocumentRequest>,
) -> Result<Json<ApiResponse<FinancialDocument>>, ApiError> {
    context.require_role(UserRole::Admin)?;

    let document = state.services.billing_service.issue_document(request).await?;

    Ok(Json(ApiResponse::ok(document)))
}

/// POST /admin/billing/bills — create a bill
async fn create_bill(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Json(request): Json<CreateBillRequest>,
) -> Result<Json<ApiResponse<Bill>>, ApiError> {
    context.require_role(UserRole::Admin)?;

    let bill = state.services.billing_service.create_bill(request).await?;

    Ok(Json(ApiResponse::ok(bill)))
}

/// PUT /admin/billing/bills/{id}/paid — mark a bill paid
async fn mark_bill_paid(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(bill_id): Path<i64>,
) -> Result<Json<ApiResponse<Bill>>, ApiError> {
    context.require_role(UserRole::Admin)?;

    let bill = state.services.billing_service.mark_bill_paid(bill_id).await?;

    Ok(Json(ApiResponse::ok(bill)))
}

// --- support inbox & stats ---

/// GET /admin/support/tickets — cross-tenant ticket inbox
async fn ticket_inbox(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Query(query): Query<TicketInboxQuery>,
) -> Result<Json<ApiResponse<Vec<SupportTicket>>>, ApiError> {
    context.require_role(UserRole::Admin)?;

    let status = match query.status.as_deref() {
        Some(raw) => Some(TicketStatus::parse(raw).ok_or_else(|| {
            crate::utils::errors::TalentGateError::InvalidInput(format!("Unknown ticket status: {}", raw))
        })?),
        None => None,
    };

    let pagination = query.pagination();
    let tickets = state.services.support_service
        .list_all(status, pagination.per_page(), pagination.offset())
        .await?;

    Ok(Json(ApiResponse::ok(tickets)))
}

/// GET /admin/stats — platform statistics
async fn stats(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    context.require_role(UserRole::Admin)?;

    let stats = state.database.get_admin_stats().await?;

    Ok(Json(ApiResponse::ok(stats)))
}
