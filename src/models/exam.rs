//! Exam models
//!
//! Exams form an admin-curated catalog; results track one exam assigned
//! to one manager.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Exam {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub question_count: i32,
    pub passing_score: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExamResult {
    pub id: i64,
    pub exam_id: i64,
    pub manager_id: i64,
    pub assigned_by: i64,
    pub status: String,
    pub score: Option<i32>,
    pub passed: Option<bool>,
    pub assigned_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Exam assignment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamStatus {
    Assigned,
    InProgress,
    Completed,
    Expired,
}

impl ExamStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExamStatus::Assigned => "assigned",
            ExamStatus::InProgress => "in_progress",
            ExamStatus::Completed => "completed",
            ExamStatus::Expired => "expired",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "assigned" => Some(ExamStatus::Assigned),
            "in_progress" => Some(ExamStatus::InProgress),
            "completed" => Some(ExamStatus::Completed),
            "expired" => Some(ExamStatus::Expired),
            _ => None,
        }
    }
}

impl ToString for ExamStatus {
    fn to_string(&self) -> String {
        self.as_str().to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExamRequest {
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub question_count: i32,
    pub passing_score: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateExamRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub question_count: Option<i32>,
    pub passing_score: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignExamRequest {
    pub exam_id: i64,
    pub manager_id: i64,
}
