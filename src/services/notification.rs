//! Notification service implementation
//!
//! This service persists in-app notifications, renders their bodies from
//! the message catalog in the recipient's language, and serves the
//! polling endpoints with a Redis-cached unread counter.

use crate::database::repositories::{NotificationRepository, UserRepository};
use crate::i18n::MessageCatalog;
use crate::models::notification::{CreateNotificationRequest, Notification, NotificationKind};
use crate::services::redis::RedisService;
use crate::utils::errors::{Result, TalentGateError};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Notification service for in-app messages
#[derive(Clone)]
pub struct NotificationService {
    notification_repository: NotificationRepository,
    user_repository: UserRepository,
    redis: RedisService,
    catalog: MessageCatalog,
}

impl NotificationService {
    /// Create a new NotificationService instance
    pub fn new(
        notification_repository: NotificationRepository,
        user_repository: UserRepository,
        redis: RedisService,
        catalog: MessageCatalog,
    ) -> Self {
        Self {
            notification_repository,
            user_repository,
            redis,
            catalog,
        }
    }

    /// Create a notification with a catalog-rendered body
    pub async fn notify(&self, user_id: i64, kind: NotificationKind, title: &str, parameters: HashMap<String, String>) -> Result<Notification> {
        debug!(user_id = user_id, kind = %kind.as_str(), "Creating notification");

        let language = match self.user_repository.find_by_id(user_id).await? {
            Some(user) => user.language_code,
            None => return Err(TalentGateError::UserNotFound { user_id }),
        };

        let body = self.catalog.render(kind.as_str(), &language, &parameters)?;

        let request = CreateNotificationRequest {
            user_id,
            kind,
            title: title.to_string(),
            body,
        };

        let notification = self.notification_repository.create(request).await?;

        if let Err(e) = self.redis.invalidate_unread_count(user_id).await {
            warn!(user_id = user_id, error = %e, "Failed to invalidate unread counter cache");
        }

        info!(notification_id = notification.id, user_id = user_id, "Notification created");
        Ok(notification)
    }

    /// Notify a manager about a new assessment assignment
    pub async fn notify_assessment_assigned(&self, user_id: i64, template_title: &str) -> Result<Notification> {
        let mut parameters = HashMap::new();
        parameters.insert("title".to_string(), template_title.to_string());

        self.notify(user_id, NotificationKind::AssessmentAssigned, template_title, parameters).await
    }

    /// Notify a manager about a new exam assignment
    pub async fn notify_exam_assigned(&self, user_id: i64, exam_title: &str, duration_minutes: i32) -> Result<Notification> {
        let mut parameters = HashMap::new();
        parameters.insert("title".to_string(), exam_title.to_string());
        parameters.insert("minutes".to_string(), duration_minutes.to_string());

        self.notify(user_id, NotificationKind::ExamAssigned, exam_title, parameters).await
    }

    /// Notify a ticket participant about a new reply
    pub async fn notify_ticket_reply(&self, user_id: i64, subject: &str) -> Result<Notification> {
        let mut parameters = HashMap::new();
        parameters.insert("subject".to_string(), subject.to_string());

        self.notify(user_id, NotificationKind::TicketReply, subject, parameters).await
    }

    /// Notify a company owner about a newly issued financial document
    pub async fn notify_document_issued(&self, user_id: i64, document_title: &str) -> Result<Notification> {
        let mut parameters = HashMap::new();
        parameters.insert("title".to_string(), document_title.to_string());

        self.notify(user_id, NotificationKind::DocumentIssued, document_title, parameters).await
    }

    /// List notifications for a user
    pub async fn list(&self, user_id: i64, limit: i64, offset: i64) -> Result<Vec<Notification>> {
        if limit > 100 {
            return Err(TalentGateError::InvalidInput("Limit cannot exceed 100".to_string()));
        }

        self.notification_repository.list_by_user(user_id, limit, offset).await
    }

    /// Unread notification count, served from cache when fresh
    pub async fn unread_count(&self, user_id: i64) -> Result<i64> {
        if let Some(cached) = self.redis.get_unread_count(user_id).await.unwrap_or(None) {
            debug!(user_id = user_id, count = cached, "Unread count served from cache");
            return Ok(cached);
        }

        let count = self.notification_repository.count_unread(user_id).await?;

        if let Err(e) = self.redis.cache_unread_count(user_id, count).await {
            warn!(user_id = user_id, error = %e, "Failed to cache unread counter");
        }

        Ok(count)
    }

    /// Mark one notification as read
    pub async fn mark_read(&self, user_id: i64, notification_id: i64) -> Result<Notification> {
        let notification = self.notification_repository.find_by_id(notification_id).await?
            .ok_or_else(|| TalentGateError::InvalidInput("Notification not found".to_string()))?;

        if notification.user_id != user_id {
            return Err(TalentGateError::PermissionDenied(
                "Notification belongs to another user".to_string()
            ));
        }

        let updated = self.notification_repository.mark_read(notification_id).await?;
        self.redis.invalidate_unread_count(user_id).await.ok();

        Ok(updated)
    }

    /// Mark all of a user's notifications as read
    pub async fn mark_all_read(&self, user_id: i64) -> Result<u64> {
        let updated = self.notification_repository.mark_all_read(user_id).await?;
        self.redis.invalidate_unread_count(user_id).await.ok();

        info!(user_id = user_id, updated = updated, "All notifications marked read");
        Ok(updated)
    }
}
