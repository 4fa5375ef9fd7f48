//! API contract tests
//!
//! Builds the real router over a lazy connection pool (no live backend
//! needed) and verifies the envelope shape, authentication gate and
//! role gating for each class of response.

mod helpers;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::Utc;
use helpers::test_settings;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use TalentGate::api::{build_router, AppState};
use TalentGate::config::Settings;
use TalentGate::database::DatabaseService;
use TalentGate::models::user::{User, UserRole};
use TalentGate::services::auth::issue_token;
use TalentGate::services::ServiceFactory;

/// Build the application over a lazy pool; no backend is contacted until
/// a handler actually runs a query.
fn test_app(settings: Settings) -> axum::Router {
    let pool = PgPoolOptions::new()
        .connect_lazy(&settings.database.url)
        .expect("lazy pool");

    let database = DatabaseService::new(pool.clone());
    let services = ServiceFactory::new(database.clone(), settings.clone()).expect("services");
    let state = AppState::new(settings, pool, database, services);

    build_router(state)
}

fn token_for(settings: &Settings, role: UserRole, company_id: Option<i64>) -> String {
    let user = User {
        id: 1,
        phone: "+905321234567".to_string(),
        email: None,
        password_hash: None,
        full_name: "Contract Test".to_string(),
        role: role.to_string(),
        company_id,
        language_code: "en".to_string(),
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    issue_token(&settings.auth, &user).expect("token")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn test_health_is_public_and_enveloped() {
    let app = test_app(test_settings());

    let response = app
        .oneshot(Request::builder().uri("/api/v1/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], serde_json::json!(true));
    // No live backend in this suite, the probes report down
    assert_eq!(body["data"]["database"], serde_json::json!(false));
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = test_app(test_settings());

    let response = app
        .oneshot(Request::builder().uri("/api/v1/managers").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["success"], serde_json::json!(false));
    assert_eq!(body["data"], Value::Null);
    assert!(body["message"].as_str().unwrap().contains("bearer token"));
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let app = test_app(test_settings());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/managers")
                .header(header::AUTHORIZATION, "Bearer not.a.token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_role_gate_rejects_wrong_role() {
    let settings = test_settings();
    let app = test_app(settings.clone());

    // A manager token on an owner route
    let token = token_for(&settings, UserRole::Manager, Some(7));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/managers")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["success"], serde_json::json!(false));
}

#[tokio::test]
async fn test_admin_route_rejects_owner() {
    let settings = test_settings();
    let app = test_app(settings.clone());

    let token = token_for(&settings, UserRole::Owner, Some(7));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/admin/companies")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_invalid_phone_is_validation_error() {
    let app = test_app(test_settings());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/otp/send")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(fixtures_otp_body("totally-not-a-phone")))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["success"], serde_json::json!(false));
    assert!(body["message"].as_str().unwrap().contains("phone"));
}

#[tokio::test]
async fn test_database_failure_maps_to_internal_error_envelope() {
    let settings = test_settings();
    let app = test_app(settings.clone());

    // Admin stats hits the (unreachable) database
    let token = token_for(&settings, UserRole::Admin, None);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/admin/stats")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["success"], serde_json::json!(false));
    // Internal details are not leaked to the client
    assert_eq!(body["message"], serde_json::json!("Internal server error"));
}

#[tokio::test]
async fn test_owner_without_company_scope_is_forbidden() {
    let settings = test_settings();
    let app = test_app(settings.clone());

    let token = token_for(&settings, UserRole::Owner, None);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/managers")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

fn fixtures_otp_body(phone: &str) -> String {
    serde_json::json!({ "phone": phone }).to_string()
}
