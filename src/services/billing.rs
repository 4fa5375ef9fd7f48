//! Billing service implementation
//!
//! This service handles admin-issued financial documents and bills, and
//! owner-side listings. Amounts are validated as non-negative minor units.

use crate::database::repositories::{BillingRepository, CompanyRepository, UserRepository};
use crate::models::billing::{
    Bill, CreateBillRequest, CreateDocumentRequest, DocumentStatus, FinancialDocument,
};
use crate::services::notification::NotificationService;
use crate::utils::errors::{Result, TalentGateError};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

fn period_regex() -> &'static Regex {
    static PERIOD_RE: OnceLock<Regex> = OnceLock::new();
    PERIOD_RE.get_or_init(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").expect("period regex is valid"))
}

/// Billing service for documents and bills
#[derive(Clone)]
pub struct BillingService {
    billing_repository: BillingRepository,
    company_repository: CompanyRepository,
    user_repository: UserRepository,
    notification_service: NotificationService,
}

impl BillingService {
    /// Create a new BillingService instance
    pub fn new(
        billing_repository: BillingRepository,
        company_repository: CompanyRepository,
        user_repository: UserRepository,
        notification_service: NotificationService,
    ) -> Self {
        Self {
            billing_repository,
            company_repository,
            user_repository,
            notification_service,
        }
    }

    // --- documents ---

    /// Issue a financial document for a company (admin)
    pub async fn issue_document(&self, request: CreateDocumentRequest) -> Result<FinancialDocument> {
        debug!(company_id = request.company_id, doc_type = %request.doc_type.as_str(), "Issuing financial document");

        if request.title.trim().is_empty() {
            return Err(TalentGateError::InvalidInput("Document title is required".to_string()));
        }

        if request.amount_minor < 0 {
            return Err(TalentGateError::InvalidInput("Amount cannot be negative".to_string()));
        }

        let company_id = request.company_id;
        if self.company_repository.find_by_id(company_id).await?.is_none() {
            return Err(TalentGateError::CompanyNotFound { company_id });
        }

        let document = self.billing_repository.create_document(request).await?;

        // Notify the company's owner accounts about the new document
        match self.user_repository.list_by_company(company_id, 50, 0).await {
            Ok(users) => {
                let notifications = users
                    .iter()
                    .filter(|u| u.role == "owner")
                    .map(|user| {
                        let service = self.notification_service.clone();
                        let title = document.title.clone();
                        let user_id = user.id;
                        async move {
                            if let Err(e) = service.notify_document_issued(user_id, &title).await {
                                warn!(user_id = user_id, error = %e, "Failed to create document notification");
                            }
                        }
                    });
                futures::future::join_all(notifications).await;
            }
            Err(e) => {
                warn!(company_id = company_id, error = %e, "Failed to load owners for document notification");
            }
        }

        info!(document_id = document.id, company_id = company_id, "Financial document issued");
        Ok(document)
    }

    /// Update a document's lifecycle status (admin)
    pub async fn set_document_status(&self, document_id: i64, status: DocumentStatus) -> Result<FinancialDocument> {
        if self.billing_repository.find_document_by_id(document_id).await?.is_none() {
            return Err(TalentGateError::InvalidInput("Document not found".to_string()));
        }

        let document = self.billing_repository.set_document_status(document_id, status.as_str()).await?;
        info!(document_id = document_id, status = %status.as_str(), "Document status updated");

        Ok(document)
    }

    /// List documents for a company (owner view)
    pub async fn list_documents(&self, company_id: i64, limit: i64, offset: i64) -> Result<Vec<FinancialDocument>> {
        if limit > 100 {
            return Err(TalentGateError::InvalidInput("Limit cannot exceed 100".to_string()));
        }

        self.billing_repository.list_documents_by_company(company_id, limit, offset).await
    }

    /// Count documents for a company
    pub async fn count_documents(&self, company_id: i64) -> Result<i64> {
        self.billing_repository.count_documents_by_company(company_id).await
    }

    /// List documents across all companies (admin view)
    pub async fn list_all_documents(&self, limit: i64, offset: i64) -> Result<Vec<FinancialDocument>> {
        if limit > 100 {
            return Err(TalentGateError::InvalidInput("Limit cannot exceed 100".to_string()));
        }

        self.billing_repository.list_all_documents(limit, offset).await
    }

    // --- bills ---

    /// Create a bill for a company (admin)
    pub async fn create_bill(&self, request: CreateBillRequest) -> Result<Bill> {
        debug!(company_id = request.company_id, period = %request.period, "Creating bill");

        if !period_regex().is_match(&request.period) {
            return Err(TalentGateError::InvalidInput("Period must be YYYY-MM".to_string()));
        }

        if request.amount_due_minor < 0 {
            return Err(TalentGateError::InvalidInput("Amount cannot be negative".to_string()));
        }

        let company_id = request.company_id;
        if self.company_repository.find_by_id(company_id).await?.is_none() {
            return Err(TalentGateError::CompanyNotFound { company_id });
        }

        let bill = self.billing_repository.create_bill(request).await?;
        info!(bill_id = bill.id, company_id = company_id, "Bill created");

        Ok(bill)
    }

    /// Mark a bill as paid (admin)
    pub async fn mark_bill_paid(&self, bill_id: i64) -> Result<Bill> {
        let existing = self.billing_repository.find_bill_by_id(bill_id).await?
            .ok_or_else(|| TalentGateError::InvalidInput("Bill not found".to_string()))?;

        if existing.status == "paid" {
            return Err(TalentGateError::InvalidInput("Bill is already paid".to_string()));
        }

        let bill = self.billing_repository.mark_bill_paid(bill_id).await?;
        info!(bill_id = bill_id, "Bill marked paid");

        Ok(bill)
    }

    /// List bills for a company (owner view)
    pub async fn list_bills(&self, company_id: i64, limit: i64, offset: i64) -> Result<Vec<Bill>> {
        if limit > 100 {
            return Err(TalentGateError::InvalidInput("Limit cannot exceed 100".to_string()));
        }

        self.billing_repository.list_bills_by_company(company_id, limit, offset).await
    }

    /// Count bills for a company
    pub async fn count_bills(&self, company_id: i64) -> Result<i64> {
        self.billing_repository.count_bills_by_company(company_id).await
    }

    /// Sweep unpaid bills past their due date into the overdue state
    pub async fn mark_overdue(&self) -> Result<u64> {
        let updated = self.billing_repository.mark_overdue().await?;
        if updated > 0 {
            info!(updated = updated, "Bills marked overdue");
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_format() {
        assert!(period_regex().is_match("2026-01"));
        assert!(period_regex().is_match("2026-12"));
        assert!(!period_regex().is_match("2026-13"));
        assert!(!period_regex().is_match("2026-1"));
        assert!(!period_regex().is_match("26-01"));
        assert!(!period_regex().is_match("2026/01"));
    }
}
