//! Notification model
//!
//! In-app notifications are persisted and polled by the clients; there is
//! no push channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub kind: String,
    pub title: String,
    pub body: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Notification kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    AssessmentAssigned,
    ExamAssigned,
    TicketReply,
    DocumentIssued,
    System,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::AssessmentAssigned => "assessment_assigned",
            NotificationKind::ExamAssigned => "exam_assigned",
            NotificationKind::TicketReply => "ticket_reply",
            NotificationKind::DocumentIssued => "document_issued",
            NotificationKind::System => "system",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "assessment_assigned" => Some(NotificationKind::AssessmentAssigned),
            "exam_assigned" => Some(NotificationKind::ExamAssigned),
            "ticket_reply" => Some(NotificationKind::TicketReply),
            "document_issued" => Some(NotificationKind::DocumentIssued),
            "system" => Some(NotificationKind::System),
            _ => None,
        }
    }
}

impl ToString for NotificationKind {
    fn to_string(&self) -> String {
        self.as_str().to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotificationRequest {
    pub user_id: i64,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
}
