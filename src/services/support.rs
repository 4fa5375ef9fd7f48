//! Support service implementation
//!
//! This service handles support tickets between company owners and the
//! platform administrators: opening tickets, threaded replies, status
//! transitions and the cross-tenant admin inbox.

use crate::database::repositories::SupportRepository;
use crate::models::support::{
    CreateTicketRequest, SupportTicket, TicketMessage, TicketStatus, TicketThread,
};
use crate::models::user::UserRole;
use crate::services::auth::AuthContext;
use crate::services::notification::NotificationService;
use crate::utils::errors::{Result, TalentGateError};
use tracing::{debug, info, warn};

/// Support service for tickets and replies
#[derive(Clone)]
pub struct SupportService {
    support_repository: SupportRepository,
    notification_service: NotificationService,
}

impl SupportService {
    /// Create a new SupportService instance
    pub fn new(support_repository: SupportRepository, notification_service: NotificationService) -> Self {
        Self {
            support_repository,
            notification_service,
        }
    }

    /// Open a ticket for a company with its first message
    pub async fn open_ticket(&self, company_id: i64, opened_by: i64, request: CreateTicketRequest) -> Result<TicketThread> {
        debug!(company_id = company_id, "Opening support ticket");

        if request.subject.trim().is_empty() {
            return Err(TalentGateError::InvalidInput("Ticket subject is required".to_string()));
        }

        if request.body.trim().is_empty() {
            return Err(TalentGateError::InvalidInput("Ticket body is required".to_string()));
        }

        let ticket = self.support_repository.create_ticket(company_id, opened_by, request.subject.trim()).await?;
        let message = self.support_repository.create_message(ticket.id, opened_by, request.body.trim()).await?;

        info!(ticket_id = ticket.id, company_id = company_id, "Support ticket opened");

        Ok(TicketThread {
            ticket,
            messages: vec![message],
        })
    }

    /// Load a ticket with its thread, enforcing visibility
    pub async fn get_thread(&self, context: &AuthContext, ticket_id: i64) -> Result<TicketThread> {
        let ticket = self.find_visible_ticket(context, ticket_id).await?;
        let messages = self.support_repository.list_messages(ticket_id).await?;

        Ok(TicketThread { ticket, messages })
    }

    /// Append a reply to a ticket.
    ///
    /// An admin reply moves the ticket to answered; a reply from the
    /// company side reopens it.
    pub async fn reply(&self, context: &AuthContext, ticket_id: i64, body: &str) -> Result<TicketMessage> {
        if body.trim().is_empty() {
            return Err(TalentGateError::InvalidInput("Reply body is required".to_string()));
        }

        let ticket = self.find_visible_ticket(context, ticket_id).await?;

        if TicketStatus::parse(&ticket.status) == Some(TicketStatus::Closed) {
            return Err(TalentGateError::InvalidInput("Ticket is closed".to_string()));
        }

        let message = self.support_repository.create_message(ticket_id, context.user_id, body.trim()).await?;

        let next_status = match context.role {
            UserRole::Admin => TicketStatus::Answered,
            _ => TicketStatus::Open,
        };
        self.support_repository.set_ticket_status(ticket_id, next_status.as_str()).await?;

        // Notify the other side of the conversation
        if context.role == UserRole::Admin {
            if let Err(e) = self.notification_service.notify_ticket_reply(ticket.opened_by, &ticket.subject).await {
                warn!(ticket_id = ticket_id, error = %e, "Failed to create ticket reply notification");
            }
        }

        info!(ticket_id = ticket_id, author_id = context.user_id, "Ticket reply added");
        Ok(message)
    }

    /// Close a ticket
    pub async fn close_ticket(&self, context: &AuthContext, ticket_id: i64) -> Result<SupportTicket> {
        let ticket = self.find_visible_ticket(context, ticket_id).await?;

        if TicketStatus::parse(&ticket.status) == Some(TicketStatus::Closed) {
            return Err(TalentGateError::InvalidInput("Ticket is already closed".to_string()));
        }

        let closed = self.support_repository.set_ticket_status(ticket_id, TicketStatus::Closed.as_str()).await?;
        info!(ticket_id = ticket_id, closed_by = context.user_id, "Ticket closed");

        Ok(closed)
    }

    /// List a company's tickets (owner view)
    pub async fn list_for_company(&self, company_id: i64, limit: i64, offset: i64) -> Result<Vec<SupportTicket>> {
        if limit > 100 {
            return Err(TalentGateError::InvalidInput("Limit cannot exceed 100".to_string()));
        }

        self.support_repository.list_tickets_by_company(company_id, limit, offset).await
    }

    /// Count a company's tickets
    pub async fn count_for_company(&self, company_id: i64) -> Result<i64> {
        self.support_repository.count_tickets_by_company(company_id).await
    }

    /// Cross-tenant ticket inbox with optional status filter (admin view)
    pub async fn list_all(&self, status: Option<TicketStatus>, limit: i64, offset: i64) -> Result<Vec<SupportTicket>> {
        if limit > 100 {
            return Err(TalentGateError::InvalidInput("Limit cannot exceed 100".to_string()));
        }

        self.support_repository
            .list_all_tickets(status.map(|s| s.as_str()), limit, offset)
            .await
    }

    /// Load a ticket the principal is allowed to see
    async fn find_visible_ticket(&self, context: &AuthContext, ticket_id: i64) -> Result<SupportTicket> {
        let ticket = self.support_repository.find_ticket_by_id(ticket_id).await?
            .ok_or(TalentGateError::TicketNotFound { ticket_id })?;

        if !context.can_view_ticket(ticket.company_id) {
            return Err(TalentGateError::TicketNotFound { ticket_id });
        }

        Ok(ticket)
    }
}
