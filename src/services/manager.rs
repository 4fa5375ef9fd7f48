//! Manager service implementation
//!
//! This service handles owner-side management of applicants/employees:
//! creation with phone normalization and duplicate checks, profile
//! updates, archiving, search and statistics.

use crate::database::repositories::ManagerRepository;
use crate::models::manager::{CreateManagerRequest, Manager, ManagerStatus, UpdateManagerRequest};
use crate::utils::errors::{Result, TalentGateError};
use crate::utils::helpers;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Manager service for applicant/employee records
#[derive(Clone)]
pub struct ManagerService {
    manager_repository: ManagerRepository,
}

impl ManagerService {
    /// Create a new ManagerService instance
    pub fn new(manager_repository: ManagerRepository) -> Self {
        Self { manager_repository }
    }

    /// Create a manager for a company
    pub async fn create_manager(&self, company_id: i64, mut request: CreateManagerRequest) -> Result<Manager> {
        debug!(company_id = company_id, "Creating manager");

        if request.full_name.trim().is_empty() {
            return Err(TalentGateError::InvalidInput("Full name is required".to_string()));
        }

        let phone = helpers::normalize_phone(&request.phone)
            .ok_or_else(|| TalentGateError::InvalidInput("Invalid phone number".to_string()))?;

        if let Some(email) = &request.email {
            if !helpers::is_valid_email(email) {
                return Err(TalentGateError::InvalidInput("Invalid email address".to_string()));
            }
        }

        if self.manager_repository.find_by_company_phone(company_id, &phone).await?.is_some() {
            warn!(company_id = company_id, phone = %phone, "Duplicate manager phone rejected");
            return Err(TalentGateError::InvalidInput(
                "A manager with this phone number already exists".to_string()
            ));
        }

        request.phone = phone;
        request.full_name = helpers::normalize_whitespace(&request.full_name);

        let manager = self.manager_repository.create(company_id, request).await?;
        info!(manager_id = manager.id, company_id = company_id, "Manager created");

        Ok(manager)
    }

    /// Get a manager, scoped to a company
    pub async fn get_manager(&self, company_id: i64, manager_id: i64) -> Result<Manager> {
        let manager = self.manager_repository.find_by_id(manager_id).await?
            .ok_or(TalentGateError::ManagerNotFound { manager_id })?;

        if manager.company_id != company_id {
            return Err(TalentGateError::ManagerNotFound { manager_id });
        }

        Ok(manager)
    }

    /// Update a manager's profile
    pub async fn update_manager(&self, company_id: i64, manager_id: i64, mut request: UpdateManagerRequest) -> Result<Manager> {
        debug!(manager_id = manager_id, "Updating manager");

        let existing = self.get_manager(company_id, manager_id).await?;

        if let Some(phone) = &request.phone {
            let normalized = helpers::normalize_phone(phone)
                .ok_or_else(|| TalentGateError::InvalidInput("Invalid phone number".to_string()))?;

            if normalized != existing.phone {
                if self.manager_repository.find_by_company_phone(company_id, &normalized).await?.is_some() {
                    return Err(TalentGateError::InvalidInput(
                        "A manager with this phone number already exists".to_string()
                    ));
                }
            }

            request.phone = Some(normalized);
        }

        if let Some(email) = &request.email {
            if !helpers::is_valid_email(email) {
                return Err(TalentGateError::InvalidInput("Invalid email address".to_string()));
            }
        }

        let manager = self.manager_repository.update(manager_id, request).await?;
        info!(manager_id = manager_id, company_id = company_id, "Manager updated");

        Ok(manager)
    }

    /// Remove a manager.
    ///
    /// Managers with assessment or exam history are archived instead of
    /// deleted so their results stay reachable.
    pub async fn remove_manager(&self, company_id: i64, manager_id: i64) -> Result<()> {
        let _ = self.get_manager(company_id, manager_id).await?;

        if self.manager_repository.has_history(manager_id).await? {
            let request = UpdateManagerRequest {
                status: Some(ManagerStatus::Archived),
                ..Default::default()
            };
            self.manager_repository.update(manager_id, request).await?;
            info!(manager_id = manager_id, "Manager archived instead of deleted (has history)");
        } else {
            self.manager_repository.delete(manager_id).await?;
            info!(manager_id = manager_id, "Manager deleted");
        }

        Ok(())
    }

    /// List a company's managers with pagination
    pub async fn list_managers(&self, company_id: i64, limit: i64, offset: i64) -> Result<Vec<Manager>> {
        debug!(company_id = company_id, limit = limit, offset = offset, "Listing managers");

        if limit > 100 {
            return Err(TalentGateError::InvalidInput("Limit cannot exceed 100".to_string()));
        }

        self.manager_repository.list_by_company(company_id, limit, offset).await
    }

    /// Count a company's managers
    pub async fn count_managers(&self, company_id: i64) -> Result<i64> {
        self.manager_repository.count_by_company(company_id).await
    }

    /// Search managers by name or phone pattern
    pub async fn search_managers(&self, company_id: i64, pattern: &str) -> Result<Vec<Manager>> {
        debug!(company_id = company_id, pattern = %pattern, "Searching managers");

        if pattern.len() < 2 {
            return Err(TalentGateError::InvalidInput("Search pattern must be at least 2 characters".to_string()));
        }

        self.manager_repository.search(company_id, pattern).await
    }

    /// Get manager statistics for a company
    pub async fn get_statistics(&self, company_id: i64) -> Result<HashMap<String, i64>> {
        debug!(company_id = company_id, "Getting manager statistics");

        let total = self.manager_repository.count_by_company(company_id).await?;
        let applicants = self.manager_repository.count_by_status(company_id, "applicant").await?;
        let employees = self.manager_repository.count_by_status(company_id, "employee").await?;
        let archived = self.manager_repository.count_by_status(company_id, "archived").await?;

        let mut stats = HashMap::new();
        stats.insert("total".to_string(), total);
        stats.insert("applicants".to_string(), applicants);
        stats.insert("employees".to_string(), employees);
        stats.insert("archived".to_string(), archived);

        Ok(stats)
    }
}
