//! Assessment repository implementation
//!
//! Covers both assessment templates and assigned assessments.

use crate::models::assessment::{
    Assessment, AssessmentTemplate, CreateTemplateRequest, UpdateTemplateRequest,
};
use crate::utils::errors::TalentGateError;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

#[derive(Clone)]
#[derive(Debug)]
pub struct AssessmentRepository {
    pool: PgPool,
}

impl AssessmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- templates ---

    /// Create a new assessment template
    pub async fn create_template(&self, company_id: Option<i64>, request: CreateTemplateRequest) -> Result<AssessmentTemplate, TalentGateError> {
        let steps = serde_json::to_value(&request.steps)?;

        let template = sqlx::query_as::<_, AssessmentTemplate>(
            r#"
            INSERT INTO assessment_templates (company_id, title, description, steps, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, company_id, title, description, steps, is_active, created_at, updated_at
            "#
        )
        .bind(company_id)
        .bind(request.title)
        .bind(request.description)
        .bind(steps)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(template)
    }

    /// Find template by ID
    pub async fn find_template_by_id(&self, id: i64) -> Result<Option<AssessmentTemplate>, TalentGateError> {
        let template = sqlx::query_as::<_, AssessmentTemplate>(
            "SELECT id, company_id, title, description, steps, is_active, created_at, updated_at FROM assessment_templates WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(template)
    }

    /// Update template
    pub async fn update_template(&self, id: i64, request: UpdateTemplateRequest) -> Result<AssessmentTemplate, TalentGateError> {
        let steps = match request.steps {
            Some(steps) => Some(serde_json::to_value(&steps)?),
            None => None,
        };

        let template = sqlx::query_as::<_, AssessmentTemplate>(
            r#"
            UPDATE assessment_templates
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                steps = COALESCE($4, steps),
                is_active = COALESCE($5, is_active),
                updated_at = $6
            WHERE id = $1
            RETURNING id, company_id, title, description, steps, is_active, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.title)
        .bind(request.description)
        .bind(steps)
        .bind(request.is_active)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(template)
    }

    /// Delete template
    pub async fn delete_template(&self, id: i64) -> Result<(), TalentGateError> {
        sqlx::query("DELETE FROM assessment_templates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List templates visible to a company (own + shared catalog)
    pub async fn list_templates_for_company(&self, company_id: i64, limit: i64, offset: i64) -> Result<Vec<AssessmentTemplate>, TalentGateError> {
        let templates = sqlx::query_as::<_, AssessmentTemplate>(
            "SELECT id, company_id, title, description, steps, is_active, created_at, updated_at FROM assessment_templates WHERE company_id = $1 OR company_id IS NULL ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        )
        .bind(company_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(templates)
    }

    /// Count templates visible to a company
    pub async fn count_templates_for_company(&self, company_id: i64) -> Result<i64, TalentGateError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM assessment_templates WHERE company_id = $1 OR company_id IS NULL"
        )
        .bind(company_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    // --- assignments ---

    /// Assign a template to a manager
    pub async fn create_assessment(&self, template_id: i64, manager_id: i64, assigned_by: i64, due_at: Option<DateTime<Utc>>) -> Result<Assessment, TalentGateError> {
        let assessment = sqlx::query_as::<_, Assessment>(
            r#"
            INSERT INTO assessments (template_id, manager_id, assigned_by, due_at, assigned_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, template_id, manager_id, assigned_by, status, current_step, answers, score, due_at, assigned_at, completed_at
            "#
        )
        .bind(template_id)
        .bind(manager_id)
        .bind(assigned_by)
        .bind(due_at)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(assessment)
    }

    /// Find assessment by ID
    pub async fn find_assessment_by_id(&self, id: i64) -> Result<Option<Assessment>, TalentGateError> {
        let assessment = sqlx::query_as::<_, Assessment>(
            "SELECT id, template_id, manager_id, assigned_by, status, current_step, answers, score, due_at, assigned_at, completed_at FROM assessments WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(assessment)
    }

    /// Record a step submission: merged answers, step pointer and status
    pub async fn record_step(&self, id: i64, answers: serde_json::Value, current_step: i32, status: &str) -> Result<Assessment, TalentGateError> {
        let assessment = sqlx::query_as::<_, Assessment>(
            r#"
            UPDATE assessments
            SET answers = $2, current_step = $3, status = $4
            WHERE id = $1
            RETURNING id, template_id, manager_id, assigned_by, status, current_step, answers, score, due_at, assigned_at, completed_at
            "#
        )
        .bind(id)
        .bind(answers)
        .bind(current_step)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(assessment)
    }

    /// Mark an assessment completed with its computed score
    pub async fn complete_assessment(&self, id: i64, score: i32) -> Result<Assessment, TalentGateError> {
        let assessment = sqlx::query_as::<_, Assessment>(
            r#"
            UPDATE assessments
            SET status = 'completed', score = $2, completed_at = $3
            WHERE id = $1
            RETURNING id, template_id, manager_id, assigned_by, status, current_step, answers, score, due_at, assigned_at, completed_at
            "#
        )
        .bind(id)
        .bind(score)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(assessment)
    }

    /// List assessments for a manager
    pub async fn list_by_manager(&self, manager_id: i64) -> Result<Vec<Assessment>, TalentGateError> {
        let assessments = sqlx::query_as::<_, Assessment>(
            "SELECT id, template_id, manager_id, assigned_by, status, current_step, answers, score, due_at, assigned_at, completed_at FROM assessments WHERE manager_id = $1 ORDER BY assigned_at DESC"
        )
        .bind(manager_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(assessments)
    }

    /// List assessments across a company with pagination
    pub async fn list_by_company(&self, company_id: i64, limit: i64, offset: i64) -> Result<Vec<Assessment>, TalentGateError> {
        let assessments = sqlx::query_as::<_, Assessment>(
            r#"
            SELECT a.id, a.template_id, a.manager_id, a.assigned_by, a.status, a.current_step, a.answers, a.score, a.due_at, a.assigned_at, a.completed_at
            FROM assessments a
            JOIN managers m ON m.id = a.manager_id
            WHERE m.company_id = $1
            ORDER BY a.assigned_at DESC
            LIMIT $2 OFFSET $3
            "#
        )
        .bind(company_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(assessments)
    }

    /// Count assessments across a company
    pub async fn count_by_company(&self, company_id: i64) -> Result<i64, TalentGateError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM assessments a JOIN managers m ON m.id = a.manager_id WHERE m.company_id = $1"
        )
        .bind(company_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Mark past-due open assessments as expired, returning the affected count
    pub async fn expire_past_due(&self) -> Result<u64, TalentGateError> {
        let result = sqlx::query(
            "UPDATE assessments SET status = 'expired' WHERE due_at IS NOT NULL AND due_at < $1 AND status IN ('assigned', 'in_progress')"
        )
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
