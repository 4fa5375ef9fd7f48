//! TalentGate HR Platform
//!
//! A multi-role REST service for HR assessment and exam management.
//! Company owners manage their managers (applicants/employees), assign
//! assessments and exams and track results; managers sign in by phone to
//! take them; administrators oversee companies, the exam catalog,
//! financial documents and support across tenants.

#![allow(non_snake_case)]

pub mod api;
pub mod config;
pub mod database;
pub mod i18n;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(feature = "demo-data")]
pub mod demo_data;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{Result, TalentGateError};

// Re-export main components for easy access
pub use api::{build_router, AppState};
pub use database::DatabaseService;
pub use i18n::MessageCatalog;
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
