//! User repository implementation

use crate::models::user::{CreateUserRequest, UpdateUserRequest, User};
use crate::utils::errors::TalentGateError;
use chrono::Utc;
use sqlx::PgPool;

#[derive(Clone)]
#[derive(Debug)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, TalentGateError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (phone, email, password_hash, full_name, role, company_id, language_code, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, phone, email, password_hash, full_name, role, company_id, language_code, is_active, created_at, updated_at
            "#
        )
        .bind(request.phone)
        .bind(request.email)
        .bind(request.password_hash)
        .bind(request.full_name)
        .bind(request.role.as_str())
        .bind(request.company_id)
        .bind(request.language_code.unwrap_or_else(|| "en".to_string()))
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, TalentGateError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, phone, email, password_hash, full_name, role, company_id, language_code, is_active, created_at, updated_at FROM users WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by phone number
    pub async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, TalentGateError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, phone, email, password_hash, full_name, role, company_id, language_code, is_active, created_at, updated_at FROM users WHERE phone = $1"
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, TalentGateError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, phone, email, password_hash, full_name, role, company_id, language_code, is_active, created_at, updated_at FROM users WHERE email = $1"
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update user
    pub async fn update(&self, id: i64, request: UpdateUserRequest) -> Result<User, TalentGateError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = COALESCE($2, email),
                password_hash = COALESCE($3, password_hash),
                full_name = COALESCE($4, full_name),
                language_code = COALESCE($5, language_code),
                is_active = COALESCE($6, is_active),
                updated_at = $7
            WHERE id = $1
            RETURNING id, phone, email, password_hash, full_name, role, company_id, language_code, is_active, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.email)
        .bind(request.password_hash)
        .bind(request.full_name)
        .bind(request.language_code)
        .bind(request.is_active)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// List users for a company with pagination
    pub async fn list_by_company(&self, company_id: i64, limit: i64, offset: i64) -> Result<Vec<User>, TalentGateError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, phone, email, password_hash, full_name, role, company_id, language_code, is_active, created_at, updated_at FROM users WHERE company_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        )
        .bind(company_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Count total users
    pub async fn count(&self) -> Result<i64, TalentGateError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Activate/deactivate user
    pub async fn set_active(&self, id: i64, is_active: bool) -> Result<User, TalentGateError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET is_active = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, phone, email, password_hash, full_name, role, company_id, language_code, is_active, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(is_active)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}
