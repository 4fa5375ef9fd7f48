//! Billing repository implementation
//!
//! Covers financial documents and periodic bills.

use crate::models::billing::{Bill, CreateBillRequest, CreateDocumentRequest, FinancialDocument};
use crate::utils::errors::TalentGateError;
use chrono::Utc;
use sqlx::PgPool;

#[derive(Clone)]
#[derive(Debug)]
pub struct BillingRepository {
    pool: PgPool,
}

impl BillingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- financial documents ---

    /// Create a new financial document
    pub async fn create_document(&self, request: CreateDocumentRequest) -> Result<FinancialDocument, TalentGateError> {
        let document = sqlx::query_as::<_, FinancialDocument>(
            r#"
            INSERT INTO financial_documents (company_id, doc_type, title, amount_minor, currency, issued_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, company_id, doc_type, title, amount_minor, currency, status, issued_at, created_at
            "#
        )
        .bind(request.company_id)
        .bind(request.doc_type.as_str())
        .bind(request.title)
        .bind(request.amount_minor)
        .bind(request.currency.unwrap_or_else(|| "TRY".to_string()))
        .bind(request.issued_at.unwrap_or_else(Utc::now))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(document)
    }

    /// Find document by ID
    pub async fn find_document_by_id(&self, id: i64) -> Result<Option<FinancialDocument>, TalentGateError> {
        let document = sqlx::query_as::<_, FinancialDocument>(
            "SELECT id, company_id, doc_type, title, amount_minor, currency, status, issued_at, created_at FROM financial_documents WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(document)
    }

    /// Update a document's status
    pub async fn set_document_status(&self, id: i64, status: &str) -> Result<FinancialDocument, TalentGateError> {
        let document = sqlx::query_as::<_, FinancialDocument>(
            r#"
            UPDATE financial_documents
            SET status = $2
            WHERE id = $1
            RETURNING id, company_id, doc_type, title, amount_minor, currency, status, issued_at, created_at
            "#
        )
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(document)
    }

    /// List documents for a company with pagination
    pub async fn list_documents_by_company(&self, company_id: i64, limit: i64, offset: i64) -> Result<Vec<FinancialDocument>, TalentGateError> {
        let documents = sqlx::query_as::<_, FinancialDocument>(
            "SELECT id, company_id, doc_type, title, amount_minor, currency, status, issued_at, created_at FROM financial_documents WHERE company_id = $1 ORDER BY issued_at DESC LIMIT $2 OFFSET $3"
        )
        .bind(company_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }

    /// Count documents for a company
    pub async fn count_documents_by_company(&self, company_id: i64) -> Result<i64, TalentGateError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM financial_documents WHERE company_id = $1")
            .bind(company_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// List documents across all companies with pagination
    pub async fn list_all_documents(&self, limit: i64, offset: i64) -> Result<Vec<FinancialDocument>, TalentGateError> {
        let documents = sqlx::query_as::<_, FinancialDocument>(
            "SELECT id, company_id, doc_type, title, amount_minor, currency, status, issued_at, created_at FROM financial_documents ORDER BY issued_at DESC LIMIT $1 OFFSET $2"
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }

    // --- bills ---

    /// Create a new bill
    pub async fn create_bill(&self, request: CreateBillRequest) -> Result<Bill, TalentGateError> {
        let bill = sqlx::query_as::<_, Bill>(
            r#"
            INSERT INTO bills (company_id, period, amount_due_minor, currency, due_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, company_id, period, amount_due_minor, currency, status, due_date, paid_at, created_at
            "#
        )
        .bind(request.company_id)
        .bind(request.period)
        .bind(request.amount_due_minor)
        .bind(request.currency.unwrap_or_else(|| "TRY".to_string()))
        .bind(request.due_date)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(bill)
    }

    /// Find bill by ID
    pub async fn find_bill_by_id(&self, id: i64) -> Result<Option<Bill>, TalentGateError> {
        let bill = sqlx::query_as::<_, Bill>(
            "SELECT id, company_id, period, amount_due_minor, currency, status, due_date, paid_at, created_at FROM bills WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(bill)
    }

    /// Mark a bill as paid
    pub async fn mark_bill_paid(&self, id: i64) -> Result<Bill, TalentGateError> {
        let bill = sqlx::query_as::<_, Bill>(
            r#"
            UPDATE bills
            SET status = 'paid', paid_at = $2
            WHERE id = $1
            RETURNING id, company_id, period, amount_due_minor, currency, status, due_date, paid_at, created_at
            "#
        )
        .bind(id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(bill)
    }

    /// Mark unpaid bills past their due date as overdue, returning the affected count
    pub async fn mark_overdue(&self) -> Result<u64, TalentGateError> {
        let result = sqlx::query(
            "UPDATE bills SET status = 'overdue' WHERE status = 'unpaid' AND due_date < CURRENT_DATE"
        )
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// List bills for a company with pagination
    pub async fn list_bills_by_company(&self, company_id: i64, limit: i64, offset: i64) -> Result<Vec<Bill>, TalentGateError> {
        let bills = sqlx::query_as::<_, Bill>(
            "SELECT id, company_id, period, amount_due_minor, currency, status, due_date, paid_at, created_at FROM bills WHERE company_id = $1 ORDER BY due_date DESC LIMIT $2 OFFSET $3"
        )
        .bind(company_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(bills)
    }

    /// Count bills for a company
    pub async fn count_bills_by_company(&self, company_id: i64) -> Result<i64, TalentGateError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bills WHERE company_id = $1")
            .bind(company_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
