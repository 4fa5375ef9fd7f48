//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{Result, TalentGateError};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_redis_config(&settings.redis)?;
    validate_auth_config(&settings.auth)?;
    validate_sms_config(&settings.sms)?;
    validate_i18n_config(&settings.i18n)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate HTTP server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(TalentGateError::Config(
            "Server host is required".to_string()
        ));
    }

    if config.port == 0 {
        return Err(TalentGateError::Config(
            "Server port must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(TalentGateError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(TalentGateError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(TalentGateError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate Redis configuration
fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(TalentGateError::Config(
            "Redis URL is required".to_string()
        ));
    }

    Ok(())
}

/// Validate authentication configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.jwt_secret.len() < 32 {
        return Err(TalentGateError::Config(
            "JWT secret must be at least 32 characters".to_string()
        ));
    }

    if config.token_ttl_hours <= 0 {
        return Err(TalentGateError::Config(
            "Token TTL must be greater than 0".to_string()
        ));
    }

    if !(4..=8).contains(&config.otp_length) {
        return Err(TalentGateError::Config(
            "OTP length must be between 4 and 8 digits".to_string()
        ));
    }

    if config.otp_ttl_seconds == 0 {
        return Err(TalentGateError::Config(
            "OTP TTL must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate SMS gateway configuration
fn validate_sms_config(config: &super::SmsConfig) -> Result<()> {
    if config.dry_run {
        return Ok(());
    }

    if config.api_url.is_empty() {
        return Err(TalentGateError::Config(
            "SMS gateway URL is required".to_string()
        ));
    }

    url::Url::parse(&config.api_url)?;

    if config.timeout_seconds == 0 {
        return Err(TalentGateError::Config(
            "SMS gateway timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate internationalization configuration
fn validate_i18n_config(config: &super::I18nConfig) -> Result<()> {
    if config.default_language.is_empty() {
        return Err(TalentGateError::Config(
            "Default language is required".to_string()
        ));
    }

    if config.supported_languages.is_empty() {
        return Err(TalentGateError::Config(
            "At least one supported language is required".to_string()
        ));
    }

    if !config.supported_languages.contains(&config.default_language) {
        return Err(TalentGateError::Config(
            "Default language must be in supported languages list".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(TalentGateError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(TalentGateError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_short_jwt_secret_rejected() {
        let mut settings = Settings::default();
        settings.auth.jwt_secret = "short".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_otp_length_bounds() {
        let mut settings = Settings::default();
        settings.auth.otp_length = 3;
        assert!(validate_settings(&settings).is_err());

        settings.auth.otp_length = 9;
        assert!(validate_settings(&settings).is_err());

        settings.auth.otp_length = 6;
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_sms_url_required_when_not_dry_run() {
        let mut settings = Settings::default();
        settings.sms.dry_run = false;
        settings.sms.api_url = String::new();
        assert!(validate_settings(&settings).is_err());

        settings.sms.api_url = "not a url".to_string();
        assert!(validate_settings(&settings).is_err());

        settings.sms.api_url = "https://gateway.example.com/v1/messages".to_string();
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_default_language_must_be_supported() {
        let mut settings = Settings::default();
        settings.i18n.default_language = "de".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut settings = Settings::default();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());
    }
}
