//! Billing models
//!
//! Financial documents and bills are issued by administrators and read by
//! company owners. Amounts are stored in minor units (kuruş/cents).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FinancialDocument {
    pub id: i64,
    pub company_id: i64,
    pub doc_type: String,
    pub title: String,
    pub amount_minor: i64,
    pub currency: String,
    pub status: String,
    pub issued_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Bill {
    pub id: i64,
    pub company_id: i64,
    pub period: String,
    pub amount_due_minor: i64,
    pub currency: String,
    pub status: String,
    pub due_date: NaiveDate,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Financial document type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Invoice,
    Receipt,
    Statement,
    Contract,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Invoice => "invoice",
            DocumentType::Receipt => "receipt",
            DocumentType::Statement => "statement",
            DocumentType::Contract => "contract",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "invoice" => Some(DocumentType::Invoice),
            "receipt" => Some(DocumentType::Receipt),
            "statement" => Some(DocumentType::Statement),
            "contract" => Some(DocumentType::Contract),
            _ => None,
        }
    }
}

impl ToString for DocumentType {
    fn to_string(&self) -> String {
        self.as_str().to_string()
    }
}

/// Document lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Draft,
    Issued,
    Paid,
    Void,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::Issued => "issued",
            DocumentStatus::Paid => "paid",
            DocumentStatus::Void => "void",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(DocumentStatus::Draft),
            "issued" => Some(DocumentStatus::Issued),
            "paid" => Some(DocumentStatus::Paid),
            "void" => Some(DocumentStatus::Void),
            _ => None,
        }
    }
}

impl ToString for DocumentStatus {
    fn to_string(&self) -> String {
        self.as_str().to_string()
    }
}

/// Bill lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    Unpaid,
    Paid,
    Overdue,
}

impl BillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillStatus::Unpaid => "unpaid",
            BillStatus::Paid => "paid",
            BillStatus::Overdue => "overdue",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "unpaid" => Some(BillStatus::Unpaid),
            "paid" => Some(BillStatus::Paid),
            "overdue" => Some(BillStatus::Overdue),
            _ => None,
        }
    }
}

impl ToString for BillStatus {
    fn to_string(&self) -> String {
        self.as_str().to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocumentRequest {
    pub company_id: i64,
    pub doc_type: DocumentType,
    pub title: String,
    pub amount_minor: i64,
    pub currency: Option<String>,
    pub issued_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBillRequest {
    pub company_id: i64,
    pub period: String,
    pub amount_due_minor: i64,
    pub currency: Option<String>,
    pub due_date: NaiveDate,
}
