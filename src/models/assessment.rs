//! Assessment models
//!
//! An assessment template is a multi-step questionnaire; an assessment is
//! one template assigned to one manager, carrying its answers and score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssessmentTemplate {
    pub id: i64,
    pub company_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub steps: serde_json::Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Assessment {
    pub id: i64,
    pub template_id: i64,
    pub manager_id: i64,
    pub assigned_by: i64,
    pub status: String,
    pub current_step: i32,
    pub answers: serde_json::Value,
    pub score: Option<i32>,
    pub due_at: Option<DateTime<Utc>>,
    pub assigned_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Assessment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    Assigned,
    InProgress,
    Completed,
    Expired,
}

impl AssessmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentStatus::Assigned => "assigned",
            AssessmentStatus::InProgress => "in_progress",
            AssessmentStatus::Completed => "completed",
            AssessmentStatus::Expired => "expired",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "assigned" => Some(AssessmentStatus::Assigned),
            "in_progress" => Some(AssessmentStatus::InProgress),
            "completed" => Some(AssessmentStatus::Completed),
            "expired" => Some(AssessmentStatus::Expired),
            _ => None,
        }
    }
}

impl ToString for AssessmentStatus {
    fn to_string(&self) -> String {
        self.as_str().to_string()
    }
}

/// One step of a template, as stored in the `steps` JSONB column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateStep {
    pub title: String,
    pub questions: Vec<TemplateQuestion>,
}

/// One question inside a template step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateQuestion {
    pub prompt: String,
    pub kind: QuestionKind,
    #[serde(default)]
    pub options: Vec<String>,
    /// Index of the correct option for scorable kinds
    #[serde(default)]
    pub expected: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Text,
    SingleChoice,
    MultiChoice,
    Scale,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTemplateRequest {
    pub title: String,
    pub description: Option<String>,
    pub steps: Vec<TemplateStep>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTemplateRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub steps: Option<Vec<TemplateStep>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignAssessmentRequest {
    pub template_id: i64,
    pub manager_id: i64,
    pub due_at: Option<DateTime<Utc>>,
}
