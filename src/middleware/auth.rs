//! Authentication middleware
//!
//! Extracts and validates the bearer token, then makes the request
//! principal available to handlers as an `AuthContext` extension.
//! Health and sign-in routes are mounted outside this layer.

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::utils::errors::TalentGateError;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

/// Extract the bearer token from the Authorization header
fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Axum middleware requiring a valid bearer token
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&request)
        .ok_or_else(|| TalentGateError::Authentication("Missing bearer token".to_string()))?;

    let context = state.services.auth_service.authenticate(token)?;
    debug!(user_id = context.user_id, role = ?context.role, "Request authenticated");

    request.extensions_mut().insert(context);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header::AUTHORIZATION;

    fn request_with_header(value: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/api/v1/managers");
        if let Some(value) = value {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_bearer_token_extraction() {
        let request = request_with_header(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&request), Some("abc.def.ghi"));
    }

    #[test]
    fn test_missing_header() {
        let request = request_with_header(None);
        assert_eq!(bearer_token(&request), None);
    }

    #[test]
    fn test_wrong_scheme_rejected() {
        let request = request_with_header(Some("Basic dXNlcjpwYXNz"));
        assert_eq!(bearer_token(&request), None);
    }

    #[test]
    fn test_empty_token_rejected() {
        let request = request_with_header(Some("Bearer "));
        assert_eq!(bearer_token(&request), None);
    }
}
