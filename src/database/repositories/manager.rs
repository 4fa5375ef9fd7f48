//! Manager repository implementation

use crate::models::manager::{CreateManagerRequest, Manager, UpdateManagerRequest};
use crate::utils::errors::TalentGateError;
use chrono::Utc;
use sqlx::PgPool;

#[derive(Clone)]
#[derive(Debug)]
pub struct ManagerRepository {
    pool: PgPool,
}

impl ManagerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new manager for a company
    pub async fn create(&self, company_id: i64, request: CreateManagerRequest) -> Result<Manager, TalentGateError> {
        let manager = sqlx::query_as::<_, Manager>(
            r#"
            INSERT INTO managers (company_id, full_name, phone, email, position, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, company_id, user_id, full_name, phone, email, position, status, created_at, updated_at
            "#
        )
        .bind(company_id)
        .bind(request.full_name)
        .bind(request.phone)
        .bind(request.email)
        .bind(request.position)
        .bind(request.status.map(|s| s.as_str()).unwrap_or("applicant"))
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(manager)
    }

    /// Find manager by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Manager>, TalentGateError> {
        let manager = sqlx::query_as::<_, Manager>(
            "SELECT id, company_id, user_id, full_name, phone, email, position, status, created_at, updated_at FROM managers WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(manager)
    }

    /// Find manager by phone number (across companies)
    pub async fn find_by_phone(&self, phone: &str) -> Result<Option<Manager>, TalentGateError> {
        let manager = sqlx::query_as::<_, Manager>(
            "SELECT id, company_id, user_id, full_name, phone, email, position, status, created_at, updated_at FROM managers WHERE phone = $1 ORDER BY created_at LIMIT 1"
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(manager)
    }

    /// Find the manager record linked to a platform user account
    pub async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Manager>, TalentGateError> {
        let manager = sqlx::query_as::<_, Manager>(
            "SELECT id, company_id, user_id, full_name, phone, email, position, status, created_at, updated_at FROM managers WHERE user_id = $1"
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(manager)
    }

    /// Find manager by phone within a company
    pub async fn find_by_company_phone(&self, company_id: i64, phone: &str) -> Result<Option<Manager>, TalentGateError> {
        let manager = sqlx::query_as::<_, Manager>(
            "SELECT id, company_id, user_id, full_name, phone, email, position, status, created_at, updated_at FROM managers WHERE company_id = $1 AND phone = $2"
        )
        .bind(company_id)
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(manager)
    }

    /// Update manager
    pub async fn update(&self, id: i64, request: UpdateManagerRequest) -> Result<Manager, TalentGateError> {
        let manager = sqlx::query_as::<_, Manager>(
            r#"
            UPDATE managers
            SET full_name = COALESCE($2, full_name),
                phone = COALESCE($3, phone),
                email = COALESCE($4, email),
                position = COALESCE($5, position),
                status = COALESCE($6, status),
                updated_at = $7
            WHERE id = $1
            RETURNING id, company_id, user_id, full_name, phone, email, position, status, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.full_name)
        .bind(request.phone)
        .bind(request.email)
        .bind(request.position)
        .bind(request.status.map(|s| s.to_string()))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(manager)
    }

    /// Link a manager to a platform user account
    pub async fn link_user(&self, id: i64, user_id: i64) -> Result<Manager, TalentGateError> {
        let manager = sqlx::query_as::<_, Manager>(
            r#"
            UPDATE managers
            SET user_id = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, company_id, user_id, full_name, phone, email, position, status, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(user_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(manager)
    }

    /// Delete manager
    pub async fn delete(&self, id: i64) -> Result<(), TalentGateError> {
        sqlx::query("DELETE FROM managers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List managers for a company with pagination
    pub async fn list_by_company(&self, company_id: i64, limit: i64, offset: i64) -> Result<Vec<Manager>, TalentGateError> {
        let managers = sqlx::query_as::<_, Manager>(
            "SELECT id, company_id, user_id, full_name, phone, email, position, status, created_at, updated_at FROM managers WHERE company_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        )
        .bind(company_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(managers)
    }

    /// Count managers for a company
    pub async fn count_by_company(&self, company_id: i64) -> Result<i64, TalentGateError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM managers WHERE company_id = $1")
            .bind(company_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Count managers for a company by status
    pub async fn count_by_status(&self, company_id: i64, status: &str) -> Result<i64, TalentGateError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM managers WHERE company_id = $1 AND status = $2")
            .bind(company_id)
            .bind(status)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Find managers by name or phone pattern within a company
    pub async fn search(&self, company_id: i64, pattern: &str) -> Result<Vec<Manager>, TalentGateError> {
        let managers = sqlx::query_as::<_, Manager>(
            "SELECT id, company_id, user_id, full_name, phone, email, position, status, created_at, updated_at FROM managers WHERE company_id = $1 AND (full_name ILIKE $2 OR phone LIKE $2)"
        )
        .bind(company_id)
        .bind(format!("%{}%", pattern))
        .fetch_all(&self.pool)
        .await?;

        Ok(managers)
    }

    /// Check whether a manager has any assessment or exam history
    pub async fn has_history(&self, id: i64) -> Result<bool, TalentGateError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT (SELECT COUNT(*) FROM assessments WHERE manager_id = $1) + (SELECT COUNT(*) FROM exam_results WHERE manager_id = $1)"
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0 > 0)
    }
}
