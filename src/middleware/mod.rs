//! Middleware module
//!
//! Bearer-token authentication, request logging and rate limiting

pub mod auth;
pub mod logging;
pub mod rate_limit;

pub use auth::require_auth;
pub use logging::log_requests;
pub use rate_limit::{limit_auth_requests, RateLimitConfig, RateLimiter};
