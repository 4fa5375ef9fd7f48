//! Exam repository implementation
//!
//! Covers the admin-curated exam catalog and per-manager exam results.

use crate::models::exam::{CreateExamRequest, Exam, ExamResult, UpdateExamRequest};
use crate::utils::errors::TalentGateError;
use chrono::Utc;
use sqlx::PgPool;

#[derive(Clone)]
#[derive(Debug)]
pub struct ExamRepository {
    pool: PgPool,
}

impl ExamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- catalog ---

    /// Create a new exam
    pub async fn create(&self, request: CreateExamRequest) -> Result<Exam, TalentGateError> {
        let exam = sqlx::query_as::<_, Exam>(
            r#"
            INSERT INTO exams (title, description, duration_minutes, question_count, passing_score, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, description, duration_minutes, question_count, passing_score, is_active, created_at, updated_at
            "#
        )
        .bind(request.title)
        .bind(request.description)
        .bind(request.duration_minutes)
        .bind(request.question_count)
        .bind(request.passing_score)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(exam)
    }

    /// Find exam by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Exam>, TalentGateError> {
        let exam = sqlx::query_as::<_, Exam>(
            "SELECT id, title, description, duration_minutes, question_count, passing_score, is_active, created_at, updated_at FROM exams WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(exam)
    }

    /// Update exam
    pub async fn update(&self, id: i64, request: UpdateExamRequest) -> Result<Exam, TalentGateError> {
        let exam = sqlx::query_as::<_, Exam>(
            r#"
            UPDATE exams
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                duration_minutes = COALESCE($4, duration_minutes),
                question_count = COALESCE($5, question_count),
                passing_score = COALESCE($6, passing_score),
                is_active = COALESCE($7, is_active),
                updated_at = $8
            WHERE id = $1
            RETURNING id, title, description, duration_minutes, question_count, passing_score, is_active, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.title)
        .bind(request.description)
        .bind(request.duration_minutes)
        .bind(request.question_count)
        .bind(request.passing_score)
        .bind(request.is_active)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(exam)
    }

    /// Delete exam
    pub async fn delete(&self, id: i64) -> Result<(), TalentGateError> {
        sqlx::query("DELETE FROM exams WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List active exams with pagination
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Exam>, TalentGateError> {
        let exams = sqlx::query_as::<_, Exam>(
            "SELECT id, title, description, duration_minutes, question_count, passing_score, is_active, created_at, updated_at FROM exams ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(exams)
    }

    /// Count exams
    pub async fn count(&self) -> Result<i64, TalentGateError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM exams")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    // --- results ---

    /// Assign an exam to a manager
    pub async fn create_result(&self, exam_id: i64, manager_id: i64, assigned_by: i64) -> Result<ExamResult, TalentGateError> {
        let result = sqlx::query_as::<_, ExamResult>(
            r#"
            INSERT INTO exam_results (exam_id, manager_id, assigned_by, assigned_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, exam_id, manager_id, assigned_by, status, score, passed, assigned_at, started_at, completed_at
            "#
        )
        .bind(exam_id)
        .bind(manager_id)
        .bind(assigned_by)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    /// Find exam result by ID
    pub async fn find_result_by_id(&self, id: i64) -> Result<Option<ExamResult>, TalentGateError> {
        let result = sqlx::query_as::<_, ExamResult>(
            "SELECT id, exam_id, manager_id, assigned_by, status, score, passed, assigned_at, started_at, completed_at FROM exam_results WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    /// Mark an exam result as started
    pub async fn start_result(&self, id: i64) -> Result<ExamResult, TalentGateError> {
        let result = sqlx::query_as::<_, ExamResult>(
            r#"
            UPDATE exam_results
            SET status = 'in_progress', started_at = $2
            WHERE id = $1
            RETURNING id, exam_id, manager_id, assigned_by, status, score, passed, assigned_at, started_at, completed_at
            "#
        )
        .bind(id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    /// Finish an exam result with status, score and pass flag
    pub async fn finish_result(&self, id: i64, status: &str, score: Option<i32>, passed: Option<bool>) -> Result<ExamResult, TalentGateError> {
        let result = sqlx::query_as::<_, ExamResult>(
            r#"
            UPDATE exam_results
            SET status = $2, score = $3, passed = $4, completed_at = $5
            WHERE id = $1
            RETURNING id, exam_id, manager_id, assigned_by, status, score, passed, assigned_at, started_at, completed_at
            "#
        )
        .bind(id)
        .bind(status)
        .bind(score)
        .bind(passed)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    /// List exam results for a manager
    pub async fn list_results_by_manager(&self, manager_id: i64) -> Result<Vec<ExamResult>, TalentGateError> {
        let results = sqlx::query_as::<_, ExamResult>(
            "SELECT id, exam_id, manager_id, assigned_by, status, score, passed, assigned_at, started_at, completed_at FROM exam_results WHERE manager_id = $1 ORDER BY assigned_at DESC"
        )
        .bind(manager_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(results)
    }

    /// List exam results across a company with pagination
    pub async fn list_results_by_company(&self, company_id: i64, limit: i64, offset: i64) -> Result<Vec<ExamResult>, TalentGateError> {
        let results = sqlx::query_as::<_, ExamResult>(
            r#"
            SELECT r.id, r.exam_id, r.manager_id, r.assigned_by, r.status, r.score, r.passed, r.assigned_at, r.started_at, r.completed_at
            FROM exam_results r
            JOIN managers m ON m.id = r.manager_id
            WHERE m.company_id = $1
            ORDER BY r.assigned_at DESC
            LIMIT $2 OFFSET $3
            "#
        )
        .bind(company_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(results)
    }

    /// Count exam results across a company
    pub async fn count_results_by_company(&self, company_id: i64) -> Result<i64, TalentGateError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM exam_results r JOIN managers m ON m.id = r.manager_id WHERE m.company_id = $1"
        )
        .bind(company_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }
}
