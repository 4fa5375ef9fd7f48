//! Services module
//!
//! This module contains business logic services

pub mod assessment;
pub mod auth;
pub mod billing;
pub mod company;
pub mod exam;
pub mod manager;
pub mod notification;
pub mod redis;
pub mod sms;
pub mod support;

// Re-export commonly used services
pub use assessment::AssessmentService;
pub use auth::{AuthContext, AuthService, Claims, OtpDispatch, SignIn};
pub use billing::BillingService;
pub use company::{CompanyService, OwnerAccountRequest};
pub use exam::ExamService;
pub use manager::ManagerService;
pub use notification::NotificationService;
pub use redis::RedisService;
pub use sms::{SmsReceipt, SmsService};
pub use support::SupportService;

use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::i18n::MessageCatalog;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub manager_service: ManagerService,
    pub assessment_service: AssessmentService,
    pub exam_service: ExamService,
    pub billing_service: BillingService,
    pub support_service: SupportService,
    pub notification_service: NotificationService,
    pub company_service: CompanyService,
    pub redis_service: RedisService,
    pub sms_service: SmsService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(database: DatabaseService, settings: Settings) -> Result<Self> {
        let catalog = MessageCatalog::new(settings.i18n.clone());
        let redis_service = RedisService::new(settings.clone())?;
        let sms_service = SmsService::new(settings.clone())?;

        let notification_service = NotificationService::new(
            database.notifications.clone(),
            database.users.clone(),
            redis_service.clone(),
            catalog.clone(),
        );

        let auth_service = AuthService::new(
            database.clone(),
            redis_service.clone(),
            sms_service.clone(),
            catalog.clone(),
            settings.clone(),
        );

        let manager_service = ManagerService::new(database.managers.clone());

        let assessment_service = AssessmentService::new(
            database.assessments.clone(),
            database.managers.clone(),
            notification_service.clone(),
        );

        let exam_service = ExamService::new(
            database.exams.clone(),
            database.managers.clone(),
            notification_service.clone(),
        );

        let billing_service = BillingService::new(
            database.billing.clone(),
            database.companies.clone(),
            database.users.clone(),
            notification_service.clone(),
        );

        let support_service = SupportService::new(
            database.support.clone(),
            notification_service.clone(),
        );

        let company_service = CompanyService::new(
            database.companies.clone(),
            database.users.clone(),
        );

        Ok(Self {
            auth_service,
            manager_service,
            assessment_service,
            exam_service,
            billing_service,
            support_service,
            notification_service,
            company_service,
            redis_service,
            sms_service,
        })
    }

    /// Health check for the stateful services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let redis_healthy = self.redis_service.health_check().await.unwrap_or(false);
        let sms_live = self.sms_service.is_live();

        ServiceHealthStatus {
            redis_healthy,
            sms_live,
        }
    }
}

/// Health status for the stateful services
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub redis_healthy: bool,
    pub sms_live: bool,
}
