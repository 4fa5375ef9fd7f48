//! Route modules
//!
//! Each module defines an axum Router for one API surface area; they are
//! assembled here into the application with the middleware stack.

pub mod admin;
pub mod assessments;
pub mod auth;
pub mod billing;
pub mod exams;
pub mod health;
pub mod managers;
pub mod notifications;
pub mod support;

use crate::api::state::AppState;
use crate::middleware::{limit_auth_requests, log_requests, require_auth};
use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the CORS layer from the configured SPA origins
fn cors_layer(state: &AppState) -> CorsLayer {
    let origins = &state.settings.server.cors_origins;

    if origins.iter().any(|origin| origin == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(parsed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Assemble the application router
pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .merge(health::router())
        .merge(
            auth::public_router()
                .layer(axum::middleware::from_fn_with_state(state.clone(), limit_auth_requests)),
        );

    let protected = Router::new()
        .merge(auth::router())
        .merge(managers::router())
        .merge(assessments::router())
        .merge(exams::router())
        .merge(billing::router())
        .merge(support::router())
        .merge(notifications::router())
        .merge(admin::router())
        .layer(axum::middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .nest("/api/v1", public.merge(protected))
        .layer(axum::middleware::from_fn(log_requests))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state))
        .with_state(state)
}
