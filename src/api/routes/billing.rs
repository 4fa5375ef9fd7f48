//! Billing routes (owner role)
//!
//! Read-only access to a company's financial documents and bills, plus
//! the owner dashboard aggregation.

use crate::api::error::ApiError;
use crate::api::extract::Pagination;
use crate::api::response::{ApiResponse, Paginated};
use crate::api::state::AppState;
use crate::models::billing::{Bill, FinancialDocument};
use crate::models::user::UserRole;
use crate::services::auth::AuthContext;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Extension, Json, Router};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/billing/documents", get(list_documents))
        .route("/billing/bills", get(list_bills))
        .route("/dashboard", get(dashboard))
}

/// GET /billing/documents — the company's financial documents
async fn list_documents(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<Paginated<FinancialDocument>>>, ApiError> {
    context.require_role(UserRole::Owner)?;
    let company_id = context.require_company()?;

    let items = state.services.billing_service
        .list_documents(company_id, pagination.per_page(), pagination.offset())
        .await?;
    let total = state.services.billing_service.count_documents(company_id).await?;

    Ok(Json(ApiResponse::ok(Paginated::new(items, total, pagination.page(), pagination.per_page()))))
}

/// GET /billing/bills — the company's bills
async fn list_bills(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<Paginated<Bill>>>, ApiError> {
    context.require_role(UserRole::Owner)?;
    let company_id = context.require_company()?;

    let items = state.services.billing_service
        .list_bills(company_id, pagination.per_page(), pagination.offset())
        .await?;
    let total = state.services.billing_service.count_bills(company_id).await?;

    Ok(Json(ApiResponse::ok(Paginated::new(items, total, pagination.page(), pagination.per_page()))))
}

/// GET /dashboard — owner dashboard aggregation
async fn dashboard(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    context.require_role(UserRole::Owner)?;
    let company_id = context.require_company()?;

    let dashboard = state.database.get_owner_dashboard(company_id).await?;

    Ok(Json(ApiResponse::ok(dashboard)))
}
