//! Company repository implementation

use crate::models::company::{Company, CreateCompanyRequest, UpdateCompanyRequest};
use crate::utils::errors::TalentGateError;
use chrono::Utc;
use sqlx::PgPool;

#[derive(Clone)]
#[derive(Debug)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new company
    pub async fn create(&self, request: CreateCompanyRequest) -> Result<Company, TalentGateError> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (name, contact_email, contact_phone, tax_number, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, contact_email, contact_phone, tax_number, is_active, created_at, updated_at
            "#
        )
        .bind(request.name)
        .bind(request.contact_email)
        .bind(request.contact_phone)
        .bind(request.tax_number)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(company)
    }

    /// Find company by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Company>, TalentGateError> {
        let company = sqlx::query_as::<_, Company>(
            "SELECT id, name, contact_email, contact_phone, tax_number, is_active, created_at, updated_at FROM companies WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(company)
    }

    /// Update company
    pub async fn update(&self, id: i64, request: UpdateCompanyRequest) -> Result<Company, TalentGateError> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies
            SET name = COALESCE($2, name),
                contact_email = COALESCE($3, contact_email),
                contact_phone = COALESCE($4, contact_phone),
                tax_number = COALESCE($5, tax_number),
                is_active = COALESCE($6, is_active),
                updated_at = $7
            WHERE id = $1
            RETURNING id, name, contact_email, contact_phone, tax_number, is_active, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.name)
        .bind(request.contact_email)
        .bind(request.contact_phone)
        .bind(request.tax_number)
        .bind(request.is_active)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(company)
    }

    /// List all companies with pagination
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Company>, TalentGateError> {
        let companies = sqlx::query_as::<_, Company>(
            "SELECT id, name, contact_email, contact_phone, tax_number, is_active, created_at, updated_at FROM companies ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(companies)
    }

    /// Count total companies
    pub async fn count(&self) -> Result<i64, TalentGateError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM companies")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Find companies by name pattern
    pub async fn find_by_name_pattern(&self, pattern: &str) -> Result<Vec<Company>, TalentGateError> {
        let companies = sqlx::query_as::<_, Company>(
            "SELECT id, name, contact_email, contact_phone, tax_number, is_active, created_at, updated_at FROM companies WHERE name ILIKE $1"
        )
        .bind(format!("%{}%", pattern))
        .fetch_all(&self.pool)
        .await?;

        Ok(companies)
    }
}
