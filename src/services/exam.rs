//! Exam service implementation
//!
//! This service handles the admin-curated exam catalog, owner-side exam
//! assignment, and the manager-side start/complete flow with duration
//! enforcement.

use crate::database::repositories::{ExamRepository, ManagerRepository};
use crate::models::exam::{
    AssignExamRequest, CreateExamRequest, Exam, ExamResult, ExamStatus, UpdateExamRequest,
};
use crate::services::notification::NotificationService;
use crate::utils::errors::{Result, TalentGateError};
use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

/// Exam service for catalog and results
#[derive(Clone)]
pub struct ExamService {
    exam_repository: ExamRepository,
    manager_repository: ManagerRepository,
    notification_service: NotificationService,
}

impl ExamService {
    /// Create a new ExamService instance
    pub fn new(
        exam_repository: ExamRepository,
        manager_repository: ManagerRepository,
        notification_service: NotificationService,
    ) -> Self {
        Self {
            exam_repository,
            manager_repository,
            notification_service,
        }
    }

    // --- catalog (admin) ---

    /// Create an exam in the catalog
    pub async fn create_exam(&self, request: CreateExamRequest) -> Result<Exam> {
        debug!(title = %request.title, "Creating exam");

        if request.title.trim().is_empty() {
            return Err(TalentGateError::InvalidInput("Exam title is required".to_string()));
        }

        if request.duration_minutes <= 0 {
            return Err(TalentGateError::InvalidInput("Exam duration must be positive".to_string()));
        }

        if request.question_count <= 0 {
            return Err(TalentGateError::InvalidInput("Exam needs at least one question".to_string()));
        }

        if !(0..=100).contains(&request.passing_score) {
            return Err(TalentGateError::InvalidInput("Passing score must be between 0 and 100".to_string()));
        }

        let exam = self.exam_repository.create(request).await?;
        info!(exam_id = exam.id, "Exam created");

        Ok(exam)
    }

    /// Get an exam by ID
    pub async fn get_exam(&self, exam_id: i64) -> Result<Exam> {
        self.exam_repository.find_by_id(exam_id).await?
            .ok_or(TalentGateError::ExamNotFound { exam_id })
    }

    /// Update an exam
    pub async fn update_exam(&self, exam_id: i64, request: UpdateExamRequest) -> Result<Exam> {
        let _ = self.get_exam(exam_id).await?;

        if let Some(duration) = request.duration_minutes {
            if duration <= 0 {
                return Err(TalentGateError::InvalidInput("Exam duration must be positive".to_string()));
            }
        }

        if let Some(passing_score) = request.passing_score {
            if !(0..=100).contains(&passing_score) {
                return Err(TalentGateError::InvalidInput("Passing score must be between 0 and 100".to_string()));
            }
        }

        let exam = self.exam_repository.update(exam_id, request).await?;
        info!(exam_id = exam_id, "Exam updated");

        Ok(exam)
    }

    /// Delete an exam
    pub async fn delete_exam(&self, exam_id: i64) -> Result<()> {
        let _ = self.get_exam(exam_id).await?;
        self.exam_repository.delete(exam_id).await?;
        info!(exam_id = exam_id, "Exam deleted");

        Ok(())
    }

    /// List exams with pagination
    pub async fn list_exams(&self, limit: i64, offset: i64) -> Result<Vec<Exam>> {
        if limit > 100 {
            return Err(TalentGateError::InvalidInput("Limit cannot exceed 100".to_string()));
        }

        self.exam_repository.list(limit, offset).await
    }

    /// Count exams
    pub async fn count_exams(&self) -> Result<i64> {
        self.exam_repository.count().await
    }

    // --- assignment (owner) ---

    /// Assign an exam to a manager
    pub async fn assign(&self, company_id: i64, assigned_by: i64, request: AssignExamRequest) -> Result<ExamResult> {
        debug!(company_id = company_id, exam_id = request.exam_id, manager_id = request.manager_id, "Assigning exam");

        let exam = self.get_exam(request.exam_id).await?;

        if !exam.is_active {
            return Err(TalentGateError::InvalidInput("Exam is not active".to_string()));
        }

        let manager = self.manager_repository.find_by_id(request.manager_id).await?
            .ok_or(TalentGateError::ManagerNotFound { manager_id: request.manager_id })?;

        if manager.company_id != company_id {
            return Err(TalentGateError::ManagerNotFound { manager_id: request.manager_id });
        }

        if manager.status == "archived" {
            return Err(TalentGateError::InvalidInput("Cannot assign to an archived manager".to_string()));
        }

        let result = self.exam_repository.create_result(exam.id, manager.id, assigned_by).await?;

        if let Some(user_id) = manager.user_id {
            if let Err(e) = self.notification_service.notify_exam_assigned(user_id, &exam.title, exam.duration_minutes).await {
                warn!(user_id = user_id, error = %e, "Failed to create exam notification");
            }
        }

        info!(result_id = result.id, exam_id = exam.id, manager_id = manager.id, "Exam assigned");
        Ok(result)
    }

    /// List exam results across a company (owner view)
    pub async fn list_results_for_company(&self, company_id: i64, limit: i64, offset: i64) -> Result<Vec<ExamResult>> {
        if limit > 100 {
            return Err(TalentGateError::InvalidInput("Limit cannot exceed 100".to_string()));
        }

        self.exam_repository.list_results_by_company(company_id, limit, offset).await
    }

    /// Count exam results across a company
    pub async fn count_results_for_company(&self, company_id: i64) -> Result<i64> {
        self.exam_repository.count_results_by_company(company_id).await
    }

    // --- taking (manager) ---

    /// List the signed-in manager's exam assignments
    pub async fn list_for_manager_user(&self, user_id: i64) -> Result<Vec<ExamResult>> {
        let manager = self.manager_for_user(user_id).await?;
        self.exam_repository.list_results_by_manager(manager.id).await
    }

    /// Start an assigned exam
    pub async fn start(&self, user_id: i64, result_id: i64) -> Result<ExamResult> {
        let manager = self.manager_for_user(user_id).await?;

        let result = self.exam_repository.find_result_by_id(result_id).await?
            .ok_or(TalentGateError::ExamNotFound { exam_id: result_id })?;

        if result.manager_id != manager.id {
            return Err(TalentGateError::ExamNotFound { exam_id: result_id });
        }

        if ExamStatus::parse(&result.status) != Some(ExamStatus::Assigned) {
            return Err(TalentGateError::InvalidInput(format!("Exam is {}", result.status)));
        }

        let started = self.exam_repository.start_result(result_id).await?;
        info!(result_id = result_id, manager_id = manager.id, "Exam started");

        Ok(started)
    }

    /// Complete a started exam with the achieved score.
    ///
    /// A completion arriving after the exam's duration window marks the
    /// result expired instead of completed.
    pub async fn complete(&self, user_id: i64, result_id: i64, score: i32) -> Result<ExamResult> {
        let manager = self.manager_for_user(user_id).await?;

        let result = self.exam_repository.find_result_by_id(result_id).await?
            .ok_or(TalentGateError::ExamNotFound { exam_id: result_id })?;

        if result.manager_id != manager.id {
            return Err(TalentGateError::ExamNotFound { exam_id: result_id });
        }

        if ExamStatus::parse(&result.status) != Some(ExamStatus::InProgress) {
            return Err(TalentGateError::InvalidInput(format!("Exam is {}", result.status)));
        }

        if !(0..=100).contains(&score) {
            return Err(TalentGateError::InvalidInput("Score must be between 0 and 100".to_string()));
        }

        let exam = self.get_exam(result.exam_id).await?;

        let started_at = result.started_at
            .ok_or_else(|| TalentGateError::InvalidInput("Exam was never started".to_string()))?;

        let deadline = started_at + Duration::minutes(exam.duration_minutes as i64);
        if Utc::now() > deadline {
            let expired = self.exam_repository
                .finish_result(result_id, ExamStatus::Expired.as_str(), None, None)
                .await?;

            warn!(result_id = result_id, "Exam completion after the duration window, marked expired");
            return Ok(expired);
        }

        let passed = score >= exam.passing_score;
        let completed = self.exam_repository
            .finish_result(result_id, ExamStatus::Completed.as_str(), Some(score), Some(passed))
            .await?;

        info!(result_id = result_id, score = score, passed = passed, "Exam completed");
        Ok(completed)
    }

    /// Resolve the manager record behind a signed-in manager account
    async fn manager_for_user(&self, user_id: i64) -> Result<crate::models::manager::Manager> {
        self.manager_repository
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| TalentGateError::PermissionDenied("No manager record for this account".to_string()))
    }
}
