//! Notification repository implementation

use crate::models::notification::{CreateNotificationRequest, Notification};
use crate::utils::errors::TalentGateError;
use chrono::Utc;
use sqlx::PgPool;

#[derive(Clone)]
#[derive(Debug)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new notification
    pub async fn create(&self, request: CreateNotificationRequest) -> Result<Notification, TalentGateError> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (user_id, kind, title, body, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, kind, title, body, is_read, created_at
            "#
        )
        .bind(request.user_id)
        .bind(request.kind.as_str())
        .bind(request.title)
        .bind(request.body)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(notification)
    }

    /// Find notification by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Notification>, TalentGateError> {
        let notification = sqlx::query_as::<_, Notification>(
            "SELECT id, user_id, kind, title, body, is_read, created_at FROM notifications WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(notification)
    }

    /// List notifications for a user with pagination
    pub async fn list_by_user(&self, user_id: i64, limit: i64, offset: i64) -> Result<Vec<Notification>, TalentGateError> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT id, user_id, kind, title, body, is_read, created_at FROM notifications WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    /// Count unread notifications for a user
    pub async fn count_unread(&self, user_id: i64) -> Result<i64, TalentGateError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = FALSE"
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Mark a notification as read
    pub async fn mark_read(&self, id: i64) -> Result<Notification, TalentGateError> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE id = $1
            RETURNING id, user_id, kind, title, body, is_read, created_at
            "#
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(notification)
    }

    /// Mark all of a user's notifications as read, returning the affected count
    pub async fn mark_all_read(&self, user_id: i64) -> Result<u64, TalentGateError> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND is_read = FALSE"
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
