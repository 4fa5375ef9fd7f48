//! Company service implementation
//!
//! This service handles admin-side company management, including
//! provisioning the initial owner account for a new company.

use crate::database::repositories::{CompanyRepository, UserRepository};
use crate::models::company::{Company, CreateCompanyRequest, UpdateCompanyRequest};
use crate::models::user::{CreateUserRequest, User, UserRole};
use crate::services::auth;
use crate::utils::errors::{Result, TalentGateError};
use crate::utils::helpers;
use serde::Deserialize;
use tracing::{debug, info};

/// Initial owner account details for a new company
#[derive(Debug, Clone, Deserialize)]
pub struct OwnerAccountRequest {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

/// Company service for tenant management
#[derive(Clone)]
pub struct CompanyService {
    company_repository: CompanyRepository,
    user_repository: UserRepository,
}

impl CompanyService {
    /// Create a new CompanyService instance
    pub fn new(company_repository: CompanyRepository, user_repository: UserRepository) -> Self {
        Self {
            company_repository,
            user_repository,
        }
    }

    /// Create a company, optionally provisioning its first owner account
    pub async fn create_company(&self, request: CreateCompanyRequest, owner: Option<OwnerAccountRequest>) -> Result<(Company, Option<User>)> {
        debug!(name = %request.name, "Creating company");

        if request.name.trim().is_empty() {
            return Err(TalentGateError::InvalidInput("Company name is required".to_string()));
        }

        let company = self.company_repository.create(request).await?;
        info!(company_id = company.id, "Company created");

        let owner_user = match owner {
            Some(owner) => Some(self.provision_owner(company.id, owner).await?),
            None => None,
        };

        Ok((company, owner_user))
    }

    /// Provision an owner account for a company
    pub async fn provision_owner(&self, company_id: i64, request: OwnerAccountRequest) -> Result<User> {
        let phone = helpers::normalize_phone(&request.phone)
            .ok_or_else(|| TalentGateError::InvalidInput("Invalid phone number".to_string()))?;

        if !helpers::is_valid_email(&request.email) {
            return Err(TalentGateError::InvalidInput("Invalid email address".to_string()));
        }

        if request.password.len() < 8 {
            return Err(TalentGateError::InvalidInput("Password must be at least 8 characters".to_string()));
        }

        if self.user_repository.find_by_phone(&phone).await?.is_some() {
            return Err(TalentGateError::InvalidInput("An account with this phone already exists".to_string()));
        }

        if self.user_repository.find_by_email(&request.email).await?.is_some() {
            return Err(TalentGateError::InvalidInput("An account with this email already exists".to_string()));
        }

        let password_hash = auth::hash_password(&request.password)?;

        let user = self.user_repository.create(CreateUserRequest {
            phone,
            email: Some(request.email),
            password_hash: Some(password_hash),
            full_name: helpers::normalize_whitespace(&request.full_name),
            role: UserRole::Owner,
            company_id: Some(company_id),
            language_code: None,
        }).await?;

        info!(user_id = user.id, company_id = company_id, "Owner account provisioned");
        Ok(user)
    }

    /// Get a company by ID
    pub async fn get_company(&self, company_id: i64) -> Result<Company> {
        self.company_repository.find_by_id(company_id).await?
            .ok_or(TalentGateError::CompanyNotFound { company_id })
    }

    /// Update a company
    pub async fn update_company(&self, company_id: i64, request: UpdateCompanyRequest) -> Result<Company> {
        let _ = self.get_company(company_id).await?;

        let company = self.company_repository.update(company_id, request).await?;
        info!(company_id = company_id, "Company updated");

        Ok(company)
    }

    /// List companies with pagination
    pub async fn list_companies(&self, limit: i64, offset: i64) -> Result<Vec<Company>> {
        if limit > 100 {
            return Err(TalentGateError::InvalidInput("Limit cannot exceed 100".to_string()));
        }

        self.company_repository.list(limit, offset).await
    }

    /// Count companies
    pub async fn count_companies(&self) -> Result<i64> {
        self.company_repository.count().await
    }

    /// Search companies by name pattern
    pub async fn search_companies(&self, pattern: &str) -> Result<Vec<Company>> {
        if pattern.len() < 2 {
            return Err(TalentGateError::InvalidInput("Search pattern must be at least 2 characters".to_string()));
        }

        self.company_repository.find_by_name_pattern(pattern).await
    }
}
