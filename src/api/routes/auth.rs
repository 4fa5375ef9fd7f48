//! Authentication routes
//!
//! Public sign-in endpoints (password and phone OTP) plus the
//! authenticated `/auth/me` lookup.

use crate::api::error::ApiError;
use crate::api::response::ApiResponse;
use crate::api::state::AppState;
use crate::models::user::User;
use crate::services::auth::{AuthContext, OtpDispatch, SignIn};
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PasswordLoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct OtpSendRequest {
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct OtpVerifyRequest {
    pub phone: String,
    pub code: String,
}

/// Public sign-in router
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/otp/send", post(otp_send))
        .route("/auth/otp/verify", post(otp_verify))
}

/// Authenticated account router
pub fn router() -> Router<AppState> {
    Router::new().route("/auth/me", get(me))
}

/// POST /auth/login — email + password sign-in
async fn login(
    State(state): State<AppState>,
    Json(request): Json<PasswordLoginRequest>,
) -> Result<Json<ApiResponse<SignIn>>, ApiError> {
    let sign_in = state.services.auth_service
        .login_with_password(&request.email, &request.password)
        .await?;

    Ok(Json(ApiResponse::ok(sign_in)))
}

/// POST /auth/otp/send — dispatch a one-time code
async fn otp_send(
    State(state): State<AppState>,
    Json(request): Json<OtpSendRequest>,
) -> Result<Json<ApiResponse<OtpDispatch>>, ApiError> {
    let dispatch = state.services.auth_service.send_otp(&request.phone).await?;

    Ok(Json(ApiResponse::ok_with_message(dispatch, "Verification code sent")))
}

/// POST /auth/otp/verify — verify the code and sign in
async fn otp_verify(
    State(state): State<AppState>,
    Json(request): Json<OtpVerifyRequest>,
) -> Result<Json<ApiResponse<SignIn>>, ApiError> {
    let sign_in = state.services.auth_service
        .verify_otp(&request.phone, &request.code)
        .await?;

    Ok(Json(ApiResponse::ok(sign_in)))
}

/// GET /auth/me — the signed-in account
async fn me(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.services.auth_service.current_user(&context).await?;

    Ok(Json(ApiResponse::ok(user)))
}
