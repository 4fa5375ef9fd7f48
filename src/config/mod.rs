//! Configuration module

pub mod settings;
pub mod validation;

pub use settings::{
    AuthConfig, DatabaseConfig, FeaturesConfig, I18nConfig, LoggingConfig, RedisConfig,
    ServerConfig, Settings, SmsConfig,
};
