//! Database service layer
//!
//! This module provides a high-level interface to database operations

use crate::database::{
    AssessmentRepository, BillingRepository, CompanyRepository, DatabasePool, ExamRepository,
    ManagerRepository, NotificationRepository, SupportRepository, UserRepository,
};
use crate::utils::errors::TalentGateError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub users: UserRepository,
    pub companies: CompanyRepository,
    pub managers: ManagerRepository,
    pub assessments: AssessmentRepository,
    pub exams: ExamRepository,
    pub billing: BillingRepository,
    pub support: SupportRepository,
    pub notifications: NotificationRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            companies: CompanyRepository::new(pool.clone()),
            managers: ManagerRepository::new(pool.clone()),
            assessments: AssessmentRepository::new(pool.clone()),
            exams: ExamRepository::new(pool.clone()),
            billing: BillingRepository::new(pool.clone()),
            support: SupportRepository::new(pool.clone()),
            notifications: NotificationRepository::new(pool),
        }
    }

    /// Owner dashboard aggregation for a company
    pub async fn get_owner_dashboard(&self, company_id: i64) -> Result<serde_json::Value, TalentGateError> {
        let total_managers = self.managers.count_by_company(company_id).await?;
        let applicants = self.managers.count_by_status(company_id, "applicant").await?;
        let employees = self.managers.count_by_status(company_id, "employee").await?;
        let total_assessments = self.assessments.count_by_company(company_id).await?;
        let total_exam_results = self.exams.count_results_by_company(company_id).await?;
        let open_bills = self.billing.count_bills_by_company(company_id).await?;

        let dashboard = serde_json::json!({
            "managers": {
                "total": total_managers,
                "applicants": applicants,
                "employees": employees
            },
            "assessments": total_assessments,
            "exam_results": total_exam_results,
            "bills": open_bills
        });

        Ok(dashboard)
    }

    /// Cross-tenant statistics for the admin console
    pub async fn get_admin_stats(&self) -> Result<serde_json::Value, TalentGateError> {
        let total_companies = self.companies.count().await?;
        let total_users = self.users.count().await?;
        let total_exams = self.exams.count().await?;
        let open_tickets = self.support.count_open_tickets().await?;

        let stats = serde_json::json!({
            "companies": total_companies,
            "users": total_users,
            "exams": total_exams,
            "open_tickets": open_tickets
        });

        Ok(stats)
    }

    /// Sweep expired assignments and overdue bills
    pub async fn sweep_expired(&self) -> Result<serde_json::Value, TalentGateError> {
        let expired_assessments = self.assessments.expire_past_due().await?;
        let overdue_bills = self.billing.mark_overdue().await?;

        let result = serde_json::json!({
            "expired_assessments": expired_assessments,
            "overdue_bills": overdue_bills
        });

        Ok(result)
    }
}
