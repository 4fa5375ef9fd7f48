//! Support ticket routes
//!
//! Owners open and follow their company's tickets; admins reach the same
//! threads through the shared visibility rules.

use crate::api::error::ApiError;
use crate::api::extract::Pagination;
use crate::api::response::{ApiResponse, Paginated};
use crate::api::state::AppState;
use crate::models::support::{
    CreateTicketMessageRequest, CreateTicketRequest, SupportTicket, TicketMessage, TicketThread,
};
use crate::models::user::UserRole;
use crate::services::auth::AuthContext;
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/support/tickets", get(list_tickets).post(open_ticket))
        .route("/support/tickets/{id}", get(get_ticket))
        .route("/support/tickets/{id}/messages", post(reply))
        .route("/support/tickets/{id}/close", post(close_ticket))
}

/// GET /support/tickets — the company's tickets
async fn list_tickets(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<Paginated<SupportTicket>>>, ApiError> {
    context.require_role(UserRole::Owner)?;
    let company_id = context.require_company()?;

    let items = state.services.support_service
        .list_for_company(company_id, pagination.per_page(), pagination.offset())
        .await?;
    let total = state.services.support_service.count_for_company(company_id).await?;

    Ok(Json(ApiResponse::ok(Paginated::new(items, total, pagination.page(), pagination.per_page()))))
}

/// POST /support/tickets — open a ticket
async fn open_ticket(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Json(request): Json<CreateTicketRequest>,
) -> Result<Json<ApiResponse<TicketThread>>, ApiError> {
    context.require_role(UserRole::Owner)?;
    let company_id = context.require_company()?;

    let thread = state.services.support_service
        .open_ticket(company_id, context.user_id, request)
        .await?;

    Ok(Json(ApiResponse::ok(thread)))
}

/// GET /support/tickets/{id} — ticket with its thread
async fn get_ticket(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(ticket_id): Path<i64>,
) -> Result<Json<ApiResponse<TicketThread>>, ApiError> {
    let thread = state.services.support_service.get_thread(&context, ticket_id).await?;

    Ok(Json(ApiResponse::ok(thread)))
}

/// POST /support/tickets/{id}/messages — append a reply
async fn reply(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(ticket_id): Path<i64>,
    Json(request): Json<CreateTicketMessageRequest>,
) -> Result<Json<ApiResponse<TicketMessage>>, ApiError> {
    let message = state.services.support_service
        .reply(&context, ticket_id, &request.body)
        .await?;

    Ok(Json(ApiResponse::ok(message)))
}

/// POST /support/tickets/{id}/close — close a ticket
async fn close_ticket(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(ticket_id): Path<i64>,
) -> Result<Json<ApiResponse<SupportTicket>>, ApiError> {
    let ticket = state.services.support_service.close_ticket(&context, ticket_id).await?;

    Ok(Json(ApiResponse::ok(ticket)))
}
