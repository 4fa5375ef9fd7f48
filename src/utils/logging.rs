//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the TalentGate application.

use crate::config::LoggingConfig;
use crate::utils::errors::Result;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "talentgate.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log user actions with structured data
pub fn log_user_action(user_id: i64, action: &str, details: Option<&str>) {
    info!(
        user_id = user_id,
        action = action,
        details = details,
        "User action performed"
    );
}

/// Log authentication events
pub fn log_auth_event(phone_or_email: &str, action: &str, success: bool) {
    if success {
        info!(
            principal = phone_or_email,
            action = action,
            "Authentication event: success"
        );
    } else {
        warn!(
            principal = phone_or_email,
            action = action,
            "Authentication event: failure"
        );
    }
}

/// Log admin actions
pub fn log_admin_action(admin_id: i64, action: &str, target: Option<&str>, details: Option<&str>) {
    warn!(
        admin_id = admin_id,
        action = action,
        target = target,
        details = details,
        "Admin action performed"
    );
}

/// Log external gateway errors with context
pub fn log_gateway_error(gateway: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        gateway = gateway,
        error = error,
        context = context,
        "Gateway error occurred"
    );
}
