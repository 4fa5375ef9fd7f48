//! Error handling for TalentGate
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the TalentGate application
#[derive(Error, Debug)]
pub enum TalentGateError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("SMS gateway error: {0}")]
    Sms(#[from] SmsError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    #[error("Company not found: {company_id}")]
    CompanyNotFound { company_id: i64 },

    #[error("Manager not found: {manager_id}")]
    ManagerNotFound { manager_id: i64 },

    #[error("Assessment template not found: {template_id}")]
    TemplateNotFound { template_id: i64 },

    #[error("Assessment not found: {assessment_id}")]
    AssessmentNotFound { assessment_id: i64 },

    #[error("Exam not found: {exam_id}")]
    ExamNotFound { exam_id: i64 },

    #[error("Support ticket not found: {ticket_id}")]
    TicketNotFound { ticket_id: i64 },

    #[error("Verification code expired")]
    OtpExpired,

    #[error("Verification code mismatch")]
    OtpMismatch,

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// SMS gateway specific errors
#[derive(Error, Debug)]
pub enum SmsError {
    #[error("SMS gateway request failed: {0}")]
    RequestFailed(String),

    #[error("SMS gateway timeout")]
    Timeout,

    #[error("Invalid SMS gateway response: {0}")]
    InvalidResponse(String),

    #[error("SMS gateway unavailable")]
    ServiceUnavailable,
}

/// Result type alias for TalentGate operations
pub type Result<T> = std::result::Result<T, TalentGateError>;

/// Result type alias for SMS gateway operations
pub type SmsResult<T> = std::result::Result<T, SmsError>;

impl TalentGateError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            TalentGateError::Database(_) => false,
            TalentGateError::Migration(_) => false,
            TalentGateError::Sms(_) => true,
            TalentGateError::Config(_) => false,
            TalentGateError::PermissionDenied(_) => false,
            TalentGateError::UserNotFound { .. } => false,
            TalentGateError::CompanyNotFound { .. } => false,
            TalentGateError::ManagerNotFound { .. } => false,
            TalentGateError::TemplateNotFound { .. } => false,
            TalentGateError::AssessmentNotFound { .. } => false,
            TalentGateError::ExamNotFound { .. } => false,
            TalentGateError::TicketNotFound { .. } => false,
            TalentGateError::OtpExpired => false,
            TalentGateError::OtpMismatch => false,
            TalentGateError::Redis(_) => true,
            TalentGateError::Http(_) => true,
            TalentGateError::Serialization(_) => false,
            TalentGateError::Io(_) => true,
            TalentGateError::UrlParse(_) => false,
            TalentGateError::Token(_) => false,
            TalentGateError::Authentication(_) => false,
            TalentGateError::RateLimitExceeded => true,
            TalentGateError::InvalidInput(_) => false,
            TalentGateError::ServiceUnavailable(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TalentGateError::Database(_) => ErrorSeverity::Critical,
            TalentGateError::Migration(_) => ErrorSeverity::Critical,
            TalentGateError::Config(_) => ErrorSeverity::Critical,
            TalentGateError::PermissionDenied(_) => ErrorSeverity::Warning,
            TalentGateError::Authentication(_) => ErrorSeverity::Warning,
            TalentGateError::OtpExpired => ErrorSeverity::Info,
            TalentGateError::OtpMismatch => ErrorSeverity::Warning,
            TalentGateError::RateLimitExceeded => ErrorSeverity::Warning,
            TalentGateError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_classification() {
        assert_eq!(TalentGateError::Config("x".to_string()).severity(), ErrorSeverity::Critical);
        assert_eq!(TalentGateError::OtpMismatch.severity(), ErrorSeverity::Warning);
        assert_eq!(TalentGateError::InvalidInput("x".to_string()).severity(), ErrorSeverity::Info);
        assert_eq!(TalentGateError::RateLimitExceeded.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_recoverability() {
        assert!(TalentGateError::Sms(SmsError::Timeout).is_recoverable());
        assert!(TalentGateError::RateLimitExceeded.is_recoverable());
        assert!(!TalentGateError::OtpMismatch.is_recoverable());
        assert!(!TalentGateError::PermissionDenied("x".to_string()).is_recoverable());
    }
}
