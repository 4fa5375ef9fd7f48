//! API error mapping
//!
//! Maps domain errors to HTTP status codes and the uniform response
//! envelope. Internal failures never leak their details to clients.

use crate::api::response::ApiResponse;
use crate::utils::errors::TalentGateError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

/// Error wrapper returned by route handlers
#[derive(Debug)]
pub struct ApiError(pub TalentGateError);

impl From<TalentGateError> for ApiError {
    fn from(error: TalentGateError) -> Self {
        Self(error)
    }
}

impl ApiError {
    /// HTTP status for the wrapped error
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            TalentGateError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            TalentGateError::Authentication(_)
            | TalentGateError::Token(_)
            | TalentGateError::OtpExpired
            | TalentGateError::OtpMismatch => StatusCode::UNAUTHORIZED,
            TalentGateError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            TalentGateError::UserNotFound { .. }
            | TalentGateError::CompanyNotFound { .. }
            | TalentGateError::ManagerNotFound { .. }
            | TalentGateError::TemplateNotFound { .. }
            | TalentGateError::AssessmentNotFound { .. }
            | TalentGateError::ExamNotFound { .. }
            | TalentGateError::TicketNotFound { .. } => StatusCode::NOT_FOUND,
            TalentGateError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            TalentGateError::Sms(_) => StatusCode::BAD_GATEWAY,
            TalentGateError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-facing message for the wrapped error
    fn message(&self) -> String {
        let status = self.status();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else if status == StatusCode::BAD_GATEWAY {
            "Message delivery failed, try again later".to_string()
        } else {
            self.0.to_string()
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(error = %self.0, severity = %self.0.severity(), "Request failed");
        }

        let body = ApiResponse::error(self.message());
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError(TalentGateError::InvalidInput("x".to_string())).status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(ApiError(TalentGateError::OtpMismatch).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError(TalentGateError::OtpExpired).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError(TalentGateError::PermissionDenied("x".to_string())).status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError(TalentGateError::ManagerNotFound { manager_id: 1 }).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError(TalentGateError::RateLimitExceeded).status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(ApiError(TalentGateError::Config("x".to_string())).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_errors_do_not_leak() {
        let error = ApiError(TalentGateError::Config("secret connection string".to_string()));
        assert_eq!(error.message(), "Internal server error");
    }

    #[test]
    fn test_client_errors_keep_their_message() {
        let error = ApiError(TalentGateError::InvalidInput("Invalid phone number".to_string()));
        assert!(error.message().contains("Invalid phone number"));
    }
}
