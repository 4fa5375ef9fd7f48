//! Request logging middleware
//!
//! Logs one structured line per request with method, path, status and
//! latency, warning on slow responses.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::{info, warn};

/// Latency above which a request is logged as slow
const SLOW_REQUEST_MS: u128 = 1_000;

/// Axum middleware logging every request
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis();

    if elapsed_ms > SLOW_REQUEST_MS {
        warn!(
            method = %method,
            path = %path,
            status = status,
            elapsed_ms = elapsed_ms as u64,
            "Slow request"
        );
    } else {
        info!(
            method = %method,
            path = %path,
            status = status,
            elapsed_ms = elapsed_ms as u64,
            "Request completed"
        );
    }

    response
}
