//! Manager model
//!
//! A manager is an applicant or employee tracked by a company owner,
//! subject to assessments and exams.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Manager {
    pub id: i64,
    pub company_id: i64,
    pub user_id: Option<i64>,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub position: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Manager lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManagerStatus {
    Applicant,
    Employee,
    Archived,
}

impl ManagerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ManagerStatus::Applicant => "applicant",
            ManagerStatus::Employee => "employee",
            ManagerStatus::Archived => "archived",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "applicant" => Some(ManagerStatus::Applicant),
            "employee" => Some(ManagerStatus::Employee),
            "archived" => Some(ManagerStatus::Archived),
            _ => None,
        }
    }
}

impl ToString for ManagerStatus {
    fn to_string(&self) -> String {
        self.as_str().to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateManagerRequest {
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub position: Option<String>,
    pub status: Option<ManagerStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateManagerRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub position: Option<String>,
    pub status: Option<ManagerStatus>,
}
