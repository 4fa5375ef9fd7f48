//! Support ticket repository implementation

use crate::models::support::{SupportTicket, TicketMessage};
use crate::utils::errors::TalentGateError;
use chrono::Utc;
use sqlx::PgPool;

#[derive(Clone)]
#[derive(Debug)]
pub struct SupportRepository {
    pool: PgPool,
}

impl SupportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a new support ticket
    pub async fn create_ticket(&self, company_id: i64, opened_by: i64, subject: &str) -> Result<SupportTicket, TalentGateError> {
        let ticket = sqlx::query_as::<_, SupportTicket>(
            r#"
            INSERT INTO support_tickets (company_id, opened_by, subject, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, company_id, opened_by, subject, status, created_at, updated_at
            "#
        )
        .bind(company_id)
        .bind(opened_by)
        .bind(subject)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(ticket)
    }

    /// Find ticket by ID
    pub async fn find_ticket_by_id(&self, id: i64) -> Result<Option<SupportTicket>, TalentGateError> {
        let ticket = sqlx::query_as::<_, SupportTicket>(
            "SELECT id, company_id, opened_by, subject, status, created_at, updated_at FROM support_tickets WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(ticket)
    }

    /// Update ticket status
    pub async fn set_ticket_status(&self, id: i64, status: &str) -> Result<SupportTicket, TalentGateError> {
        let ticket = sqlx::query_as::<_, SupportTicket>(
            r#"
            UPDATE support_tickets
            SET status = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, company_id, opened_by, subject, status, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(ticket)
    }

    /// List tickets for a company with pagination
    pub async fn list_tickets_by_company(&self, company_id: i64, limit: i64, offset: i64) -> Result<Vec<SupportTicket>, TalentGateError> {
        let tickets = sqlx::query_as::<_, SupportTicket>(
            "SELECT id, company_id, opened_by, subject, status, created_at, updated_at FROM support_tickets WHERE company_id = $1 ORDER BY updated_at DESC LIMIT $2 OFFSET $3"
        )
        .bind(company_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(tickets)
    }

    /// List tickets across all companies, optionally filtered by status
    pub async fn list_all_tickets(&self, status: Option<&str>, limit: i64, offset: i64) -> Result<Vec<SupportTicket>, TalentGateError> {
        let tickets = match status {
            Some(status) => {
                sqlx::query_as::<_, SupportTicket>(
                    "SELECT id, company_id, opened_by, subject, status, created_at, updated_at FROM support_tickets WHERE status = $1 ORDER BY updated_at DESC LIMIT $2 OFFSET $3"
                )
                .bind(status)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, SupportTicket>(
                    "SELECT id, company_id, opened_by, subject, status, created_at, updated_at FROM support_tickets ORDER BY updated_at DESC LIMIT $1 OFFSET $2"
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(tickets)
    }

    /// Count tickets for a company
    pub async fn count_tickets_by_company(&self, company_id: i64) -> Result<i64, TalentGateError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM support_tickets WHERE company_id = $1")
            .bind(company_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Count open tickets across all companies
    pub async fn count_open_tickets(&self) -> Result<i64, TalentGateError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM support_tickets WHERE status = 'open'")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Append a message to a ticket
    pub async fn create_message(&self, ticket_id: i64, author_id: i64, body: &str) -> Result<TicketMessage, TalentGateError> {
        let message = sqlx::query_as::<_, TicketMessage>(
            r#"
            INSERT INTO ticket_messages (ticket_id, author_id, body, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, ticket_id, author_id, body, created_at
            "#
        )
        .bind(ticket_id)
        .bind(author_id)
        .bind(body)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    /// List messages for a ticket, oldest first
    pub async fn list_messages(&self, ticket_id: i64) -> Result<Vec<TicketMessage>, TalentGateError> {
        let messages = sqlx::query_as::<_, TicketMessage>(
            "SELECT id, ticket_id, author_id, body, created_at FROM ticket_messages WHERE ticket_id = $1 ORDER BY created_at ASC"
        )
        .bind(ticket_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }
}
