//! Assessment service implementation
//!
//! This service handles assessment template management, assignment of
//! templates to managers, sequential step submission with answer
//! validation, and completion scoring.

use crate::database::repositories::{AssessmentRepository, ManagerRepository};
use crate::models::assessment::{
    Assessment, AssessmentStatus, AssessmentTemplate, AssignAssessmentRequest,
    CreateTemplateRequest, QuestionKind, TemplateStep, UpdateTemplateRequest,
};
use crate::services::notification::NotificationService;
use crate::utils::errors::{Result, TalentGateError};
use chrono::Utc;
use tracing::{debug, info, warn};

/// Compute the percentage score for a completed assessment.
///
/// Only single-choice questions with an expected option are scorable;
/// an assessment without any scorable question yields no score.
pub fn compute_score(steps: &[TemplateStep], answers: &[Vec<serde_json::Value>]) -> Option<i32> {
    let mut scorable = 0u32;
    let mut correct = 0u32;

    for (step_index, step) in steps.iter().enumerate() {
        for (question_index, question) in step.questions.iter().enumerate() {
            let expected = match (question.kind, question.expected) {
                (QuestionKind::SingleChoice, Some(expected)) => expected,
                _ => continue,
            };

            scorable += 1;

            let answer = answers
                .get(step_index)
                .and_then(|step_answers| step_answers.get(question_index))
                .and_then(|value| value.as_u64());

            if answer == Some(expected as u64) {
                correct += 1;
            }
        }
    }

    if scorable == 0 {
        None
    } else {
        Some(((correct * 100) / scorable) as i32)
    }
}

/// Validate one step submission against the template definition
pub fn validate_step_answers(steps: &[TemplateStep], step: usize, answers: &[serde_json::Value]) -> Result<()> {
    let template_step = steps.get(step)
        .ok_or_else(|| TalentGateError::InvalidInput(format!("Step {} is out of range", step)))?;

    if answers.len() != template_step.questions.len() {
        return Err(TalentGateError::InvalidInput(format!(
            "Step {} expects {} answers, got {}",
            step,
            template_step.questions.len(),
            answers.len()
        )));
    }

    for (index, (question, answer)) in template_step.questions.iter().zip(answers.iter()).enumerate() {
        let valid = match question.kind {
            QuestionKind::Text => answer.is_string(),
            QuestionKind::SingleChoice => answer
                .as_u64()
                .map(|choice| (choice as usize) < question.options.len())
                .unwrap_or(false),
            QuestionKind::MultiChoice => answer
                .as_array()
                .map(|choices| {
                    choices.iter().all(|choice| {
                        choice
                            .as_u64()
                            .map(|c| (c as usize) < question.options.len())
                            .unwrap_or(false)
                    })
                })
                .unwrap_or(false),
            QuestionKind::Scale => answer
                .as_u64()
                .map(|value| (1..=10).contains(&value))
                .unwrap_or(false),
        };

        if !valid {
            return Err(TalentGateError::InvalidInput(format!(
                "Answer {} of step {} does not match the question shape",
                index, step
            )));
        }
    }

    Ok(())
}

/// Assessment service for templates and assignments
#[derive(Clone)]
pub struct AssessmentService {
    assessment_repository: AssessmentRepository,
    manager_repository: ManagerRepository,
    notification_service: NotificationService,
}

impl AssessmentService {
    /// Create a new AssessmentService instance
    pub fn new(
        assessment_repository: AssessmentRepository,
        manager_repository: ManagerRepository,
        notification_service: NotificationService,
    ) -> Self {
        Self {
            assessment_repository,
            manager_repository,
            notification_service,
        }
    }

    // --- templates ---

    /// Create an assessment template for a company
    pub async fn create_template(&self, company_id: i64, request: CreateTemplateRequest) -> Result<AssessmentTemplate> {
        debug!(company_id = company_id, "Creating assessment template");

        if request.title.trim().is_empty() {
            return Err(TalentGateError::InvalidInput("Template title is required".to_string()));
        }

        if request.steps.is_empty() {
            return Err(TalentGateError::InvalidInput("Template needs at least one step".to_string()));
        }

        for (index, step) in request.steps.iter().enumerate() {
            if step.questions.is_empty() {
                return Err(TalentGateError::InvalidInput(format!("Step {} has no questions", index)));
            }
        }

        let template = self.assessment_repository.create_template(Some(company_id), request).await?;
        info!(template_id = template.id, company_id = company_id, "Assessment template created");

        Ok(template)
    }

    /// Get a template visible to a company
    pub async fn get_template(&self, company_id: i64, template_id: i64) -> Result<AssessmentTemplate> {
        let template = self.assessment_repository.find_template_by_id(template_id).await?
            .ok_or(TalentGateError::TemplateNotFound { template_id })?;

        // Shared catalog templates carry no company scope
        if template.company_id.is_some() && template.company_id != Some(company_id) {
            return Err(TalentGateError::TemplateNotFound { template_id });
        }

        Ok(template)
    }

    /// Update a company-owned template
    pub async fn update_template(&self, company_id: i64, template_id: i64, request: UpdateTemplateRequest) -> Result<AssessmentTemplate> {
        let existing = self.get_template(company_id, template_id).await?;

        if existing.company_id.is_none() {
            return Err(TalentGateError::PermissionDenied(
                "Shared catalog templates cannot be edited by owners".to_string()
            ));
        }

        let template = self.assessment_repository.update_template(template_id, request).await?;
        info!(template_id = template_id, "Assessment template updated");

        Ok(template)
    }

    /// Delete a company-owned template
    pub async fn delete_template(&self, company_id: i64, template_id: i64) -> Result<()> {
        let existing = self.get_template(company_id, template_id).await?;

        if existing.company_id.is_none() {
            return Err(TalentGateError::PermissionDenied(
                "Shared catalog templates cannot be deleted by owners".to_string()
            ));
        }

        self.assessment_repository.delete_template(template_id).await?;
        info!(template_id = template_id, "Assessment template deleted");

        Ok(())
    }

    /// List templates visible to a company
    pub async fn list_templates(&self, company_id: i64, limit: i64, offset: i64) -> Result<Vec<AssessmentTemplate>> {
        if limit > 100 {
            return Err(TalentGateError::InvalidInput("Limit cannot exceed 100".to_string()));
        }

        self.assessment_repository.list_templates_for_company(company_id, limit, offset).await
    }

    /// Count templates visible to a company
    pub async fn count_templates(&self, company_id: i64) -> Result<i64> {
        self.assessment_repository.count_templates_for_company(company_id).await
    }

    // --- assignments ---

    /// Assign a template to a manager
    pub async fn assign(&self, company_id: i64, assigned_by: i64, request: AssignAssessmentRequest) -> Result<Assessment> {
        debug!(company_id = company_id, template_id = request.template_id, manager_id = request.manager_id, "Assigning assessment");

        let template = self.get_template(company_id, request.template_id).await?;

        if !template.is_active {
            return Err(TalentGateError::InvalidInput("Template is not active".to_string()));
        }

        let manager = self.manager_repository.find_by_id(request.manager_id).await?
            .ok_or(TalentGateError::ManagerNotFound { manager_id: request.manager_id })?;

        if manager.company_id != company_id {
            return Err(TalentGateError::ManagerNotFound { manager_id: request.manager_id });
        }

        if manager.status == "archived" {
            return Err(TalentGateError::InvalidInput("Cannot assign to an archived manager".to_string()));
        }

        if let Some(due_at) = request.due_at {
            if due_at <= Utc::now() {
                return Err(TalentGateError::InvalidInput("Due date must be in the future".to_string()));
            }
        }

        let assessment = self.assessment_repository
            .create_assessment(template.id, manager.id, assigned_by, request.due_at)
            .await?;

        if let Some(user_id) = manager.user_id {
            if let Err(e) = self.notification_service.notify_assessment_assigned(user_id, &template.title).await {
                warn!(user_id = user_id, error = %e, "Failed to create assignment notification");
            }
        }

        info!(assessment_id = assessment.id, manager_id = manager.id, "Assessment assigned");
        Ok(assessment)
    }

    /// Get an assessment scoped to a company
    pub async fn get_assessment(&self, company_id: i64, assessment_id: i64) -> Result<Assessment> {
        let assessment = self.assessment_repository.find_assessment_by_id(assessment_id).await?
            .ok_or(TalentGateError::AssessmentNotFound { assessment_id })?;

        let manager = self.manager_repository.find_by_id(assessment.manager_id).await?
            .ok_or(TalentGateError::ManagerNotFound { manager_id: assessment.manager_id })?;

        if manager.company_id != company_id {
            return Err(TalentGateError::AssessmentNotFound { assessment_id });
        }

        Ok(assessment)
    }

    /// List assessments for a manager (owner view)
    pub async fn list_for_manager(&self, company_id: i64, manager_id: i64) -> Result<Vec<Assessment>> {
        let manager = self.manager_repository.find_by_id(manager_id).await?
            .ok_or(TalentGateError::ManagerNotFound { manager_id })?;

        if manager.company_id != company_id {
            return Err(TalentGateError::ManagerNotFound { manager_id });
        }

        self.assessment_repository.list_by_manager(manager_id).await
    }

    /// List assessments across a company
    pub async fn list_for_company(&self, company_id: i64, limit: i64, offset: i64) -> Result<Vec<Assessment>> {
        if limit > 100 {
            return Err(TalentGateError::InvalidInput("Limit cannot exceed 100".to_string()));
        }

        self.assessment_repository.list_by_company(company_id, limit, offset).await
    }

    /// Count assessments across a company
    pub async fn count_for_company(&self, company_id: i64) -> Result<i64> {
        self.assessment_repository.count_by_company(company_id).await
    }

    /// List assessments assigned to the signed-in manager
    pub async fn list_for_manager_user(&self, user_id: i64) -> Result<Vec<Assessment>> {
        let manager = self.manager_for_user(user_id).await?;
        self.assessment_repository.list_by_manager(manager.id).await
    }

    /// Submit answers for one step of an assigned assessment.
    ///
    /// Steps are sequential; submitting the final step completes the
    /// assessment and computes its score.
    pub async fn submit_step(&self, user_id: i64, assessment_id: i64, step: usize, answers: Vec<serde_json::Value>) -> Result<Assessment> {
        let manager = self.manager_for_user(user_id).await?;

        let assessment = self.assessment_repository.find_assessment_by_id(assessment_id).await?
            .ok_or(TalentGateError::AssessmentNotFound { assessment_id })?;

        if assessment.manager_id != manager.id {
            return Err(TalentGateError::AssessmentNotFound { assessment_id });
        }

        match AssessmentStatus::parse(&assessment.status) {
            Some(AssessmentStatus::Assigned) | Some(AssessmentStatus::InProgress) => {}
            _ => {
                return Err(TalentGateError::InvalidInput(
                    format!("Assessment is {}", assessment.status)
                ));
            }
        }

        if let Some(due_at) = assessment.due_at {
            if due_at < Utc::now() {
                self.assessment_repository
                    .record_step(assessment_id, assessment.answers.clone(), assessment.current_step, AssessmentStatus::Expired.as_str())
                    .await?;
                return Err(TalentGateError::InvalidInput("Assessment is past its due date".to_string()));
            }
        }

        if step != assessment.current_step as usize {
            return Err(TalentGateError::InvalidInput(format!(
                "Expected step {}, got {}",
                assessment.current_step, step
            )));
        }

        let template = self.assessment_repository.find_template_by_id(assessment.template_id).await?
            .ok_or(TalentGateError::TemplateNotFound { template_id: assessment.template_id })?;

        let steps: Vec<TemplateStep> = serde_json::from_value(template.steps.clone())?;
        validate_step_answers(&steps, step, &answers)?;

        let mut recorded: Vec<Vec<serde_json::Value>> =
            serde_json::from_value(assessment.answers.clone()).unwrap_or_default();
        while recorded.len() <= step {
            recorded.push(Vec::new());
        }
        recorded[step] = answers;

        let is_final_step = step + 1 == steps.len();
        let merged = serde_json::to_value(&recorded)?;

        if is_final_step {
            self.assessment_repository
                .record_step(assessment_id, merged, step as i32, AssessmentStatus::InProgress.as_str())
                .await?;

            let score = compute_score(&steps, &recorded).unwrap_or(0);
            let completed = self.assessment_repository.complete_assessment(assessment_id, score).await?;

            info!(assessment_id = assessment_id, score = score, "Assessment completed");
            Ok(completed)
        } else {
            let updated = self.assessment_repository
                .record_step(assessment_id, merged, (step + 1) as i32, AssessmentStatus::InProgress.as_str())
                .await?;

            debug!(assessment_id = assessment_id, next_step = step + 1, "Assessment step recorded");
            Ok(updated)
        }
    }

    /// Sweep past-due assignments into the expired state
    pub async fn expire_past_due(&self) -> Result<u64> {
        let expired = self.assessment_repository.expire_past_due().await?;
        if expired > 0 {
            info!(expired = expired, "Past-due assessments expired");
        }
        Ok(expired)
    }

    /// Resolve the manager record behind a signed-in manager account
    async fn manager_for_user(&self, user_id: i64) -> Result<crate::models::manager::Manager> {
        self.manager_repository
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| TalentGateError::PermissionDenied("No manager record for this account".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessment::TemplateQuestion;

    fn sample_steps() -> Vec<TemplateStep> {
        vec![
            TemplateStep {
                title: "Basics".to_string(),
                questions: vec![
                    TemplateQuestion {
                        prompt: "Pick one".to_string(),
                        kind: QuestionKind::SingleChoice,
                        options: vec!["a".to_string(), "b".to_string()],
                        expected: Some(1),
                    },
                    TemplateQuestion {
                        prompt: "Describe yourself".to_string(),
                        kind: QuestionKind::Text,
                        options: vec![],
                        expected: None,
                    },
                ],
            },
            TemplateStep {
                title: "Depth".to_string(),
                questions: vec![
                    TemplateQuestion {
                        prompt: "Pick another".to_string(),
                        kind: QuestionKind::SingleChoice,
                        options: vec!["x".to_string(), "y".to_string(), "z".to_string()],
                        expected: Some(0),
                    },
                    TemplateQuestion {
                        prompt: "Rate it".to_string(),
                        kind: QuestionKind::Scale,
                        options: vec![],
                        expected: None,
                    },
                ],
            },
        ]
    }

    #[test]
    fn test_compute_score_all_correct() {
        let steps = sample_steps();
        let answers = vec![
            vec![serde_json::json!(1), serde_json::json!("hello")],
            vec![serde_json::json!(0), serde_json::json!(7)],
        ];

        assert_eq!(compute_score(&steps, &answers), Some(100));
    }

    #[test]
    fn test_compute_score_half_correct() {
        let steps = sample_steps();
        let answers = vec![
            vec![serde_json::json!(0), serde_json::json!("hello")],
            vec![serde_json::json!(0), serde_json::json!(7)],
        ];

        assert_eq!(compute_score(&steps, &answers), Some(50));
    }

    #[test]
    fn test_compute_score_without_scorable_questions() {
        let steps = vec![TemplateStep {
            title: "Freeform".to_string(),
            questions: vec![TemplateQuestion {
                prompt: "Say anything".to_string(),
                kind: QuestionKind::Text,
                options: vec![],
                expected: None,
            }],
        }];

        let answers = vec![vec![serde_json::json!("anything")]];
        assert_eq!(compute_score(&steps, &answers), None);
    }

    #[test]
    fn test_validate_step_answers_happy_path() {
        let steps = sample_steps();
        let answers = vec![serde_json::json!(1), serde_json::json!("hi")];
        assert!(validate_step_answers(&steps, 0, &answers).is_ok());
    }

    #[test]
    fn test_validate_step_answers_out_of_range_step() {
        let steps = sample_steps();
        let answers = vec![serde_json::json!(1)];
        assert!(validate_step_answers(&steps, 5, &answers).is_err());
    }

    #[test]
    fn test_validate_step_answers_wrong_arity() {
        let steps = sample_steps();
        let answers = vec![serde_json::json!(1)];
        assert!(validate_step_answers(&steps, 0, &answers).is_err());
    }

    #[test]
    fn test_validate_step_answers_choice_out_of_bounds() {
        let steps = sample_steps();
        let answers = vec![serde_json::json!(9), serde_json::json!("hi")];
        assert!(validate_step_answers(&steps, 0, &answers).is_err());
    }

    #[test]
    fn test_validate_step_answers_scale_bounds() {
        let steps = sample_steps();
        let good = vec![serde_json::json!(0), serde_json::json!(10)];
        assert!(validate_step_answers(&steps, 1, &good).is_ok());

        let bad = vec![serde_json::json!(0), serde_json::json!(11)];
        assert!(validate_step_answers(&steps, 1, &bad).is_err());
    }
}
