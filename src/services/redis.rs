//! Redis integration service implementation
//!
//! This service handles Redis connection setup, one-time-code storage for
//! the OTP sign-in flow, fixed-window rate limiting counters, and caching
//! for frequently polled values such as unread notification counts.

use crate::config::settings::Settings;
use crate::utils::errors::{Result, TalentGateError};
use redis::{AsyncCommands, Client, RedisResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Redis service for caching and short-lived state
#[derive(Clone)]
#[derive(Debug)]
pub struct RedisService {
    client: Client,
    settings: Settings,
}

impl RedisService {
    /// Create a new RedisService instance
    pub fn new(settings: Settings) -> Result<Self> {
        let client = Client::open(settings.redis.url.as_str())
            .map_err(TalentGateError::Redis)?;

        Ok(Self { client, settings })
    }

    /// Get Redis connection
    async fn get_connection(&self) -> Result<redis::aio::Connection> {
        self.client.get_async_connection().await
            .map_err(TalentGateError::Redis)
    }

    /// Set a value in Redis with TTL
    pub async fn set<T>(&self, key: &str, value: &T, ttl_seconds: Option<u64>) -> Result<()>
    where
        T: Serialize,
    {
        let mut conn = self.get_connection().await?;
        let serialized = serde_json::to_string(value)
            .map_err(TalentGateError::Serialization)?;

        let full_key = format!("{}{}", self.settings.redis.prefix, key);
        let ttl = ttl_seconds.unwrap_or(self.settings.redis.ttl_seconds);

        let _: () = conn.set_ex(&full_key, serialized, ttl).await
            .map_err(TalentGateError::Redis)?;

        debug!(key = %full_key, ttl = ttl, "Value set in Redis");
        Ok(())
    }

    /// Get a value from Redis
    pub async fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let mut conn = self.get_connection().await?;
        let full_key = format!("{}{}", self.settings.redis.prefix, key);

        let result: Option<String> = conn.get(&full_key).await
            .map_err(TalentGateError::Redis)?;

        match result {
            Some(data) => {
                let deserialized = serde_json::from_str::<T>(&data)
                    .map_err(TalentGateError::Serialization)?;
                debug!(key = %full_key, "Value retrieved from Redis");
                Ok(Some(deserialized))
            }
            None => {
                debug!(key = %full_key, "Key not found in Redis");
                Ok(None)
            }
        }
    }

    /// Delete a key from Redis
    pub async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let full_key = format!("{}{}", self.settings.redis.prefix, key);

        let deleted: i32 = conn.del(&full_key).await
            .map_err(TalentGateError::Redis)?;

        debug!(key = %full_key, deleted = deleted > 0, "Key deletion attempted");
        Ok(deleted > 0)
    }

    /// Check if a key exists in Redis
    pub async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let full_key = format!("{}{}", self.settings.redis.prefix, key);

        let exists: bool = conn.exists(&full_key).await
            .map_err(TalentGateError::Redis)?;

        debug!(key = %full_key, exists = exists, "Key existence check");
        Ok(exists)
    }

    /// Get TTL for a key
    pub async fn ttl(&self, key: &str) -> Result<i64> {
        let mut conn = self.get_connection().await?;
        let full_key = format!("{}{}", self.settings.redis.prefix, key);

        let ttl: i64 = conn.ttl(&full_key).await
            .map_err(TalentGateError::Redis)?;

        debug!(key = %full_key, ttl = ttl, "TTL retrieved for key");
        Ok(ttl)
    }

    /// Increment a counter with TTL
    pub async fn increment_with_ttl(&self, key: &str, ttl_seconds: u64) -> Result<i64> {
        let mut conn = self.get_connection().await?;
        let full_key = format!("{}{}", self.settings.redis.prefix, key);

        // Use a pipeline to ensure atomicity
        let (value,): (i64,) = redis::pipe()
            .incr(&full_key, 1)
            .expire(&full_key, ttl_seconds as i64)
            .query_async(&mut conn)
            .await
            .map_err(TalentGateError::Redis)?;

        debug!(key = %full_key, value = value, ttl = ttl_seconds, "Counter incremented with TTL");
        Ok(value)
    }

    /// Rate limiting check
    pub async fn check_rate_limit(&self, identifier: &str, limit: u64, window_seconds: u64) -> Result<bool> {
        let key = format!("rate_limit:{}", identifier);
        let current_count = self.increment_with_ttl(&key, window_seconds).await?;

        let allowed = current_count <= limit as i64;
        debug!(
            identifier = %identifier,
            current_count = current_count,
            limit = limit,
            allowed = allowed,
            "Rate limit check"
        );

        Ok(allowed)
    }

    // --- OTP storage ---

    /// Store a one-time code for a phone number
    pub async fn store_otp(&self, phone: &str, code: &str, ttl_seconds: u64) -> Result<()> {
        let key = format!("otp:{}", phone);
        self.set(&key, &code.to_string(), Some(ttl_seconds)).await
    }

    /// Get the stored one-time code for a phone number
    pub async fn get_otp(&self, phone: &str) -> Result<Option<String>> {
        let key = format!("otp:{}", phone);
        self.get(&key).await
    }

    /// Consume the one-time code for a phone number
    pub async fn consume_otp(&self, phone: &str) -> Result<bool> {
        let key = format!("otp:{}", phone);
        self.delete(&key).await
    }

    /// Check and arm the resend cooldown for a phone number.
    ///
    /// Returns false while the previous cooldown is still active.
    pub async fn arm_otp_cooldown(&self, phone: &str, cooldown_seconds: u64) -> Result<bool> {
        let key = format!("otp:cooldown:{}", phone);
        if self.exists(&key).await? {
            return Ok(false);
        }

        self.set(&key, &1u8, Some(cooldown_seconds)).await?;
        Ok(true)
    }

    // --- cached counters ---

    /// Cache the unread notification count for a user
    pub async fn cache_unread_count(&self, user_id: i64, count: i64) -> Result<()> {
        let key = format!("notifications:unread:{}", user_id);
        self.set(&key, &count, Some(60)).await
    }

    /// Get the cached unread notification count for a user
    pub async fn get_unread_count(&self, user_id: i64) -> Result<Option<i64>> {
        let key = format!("notifications:unread:{}", user_id);
        self.get(&key).await
    }

    /// Invalidate the cached unread notification count for a user
    pub async fn invalidate_unread_count(&self, user_id: i64) -> Result<bool> {
        let key = format!("notifications:unread:{}", user_id);
        self.delete(&key).await
    }

    /// Health check for Redis connection
    pub async fn health_check(&self) -> Result<bool> {
        match self.get_connection().await {
            Ok(mut conn) => {
                let result: RedisResult<String> = redis::cmd("PING").query_async(&mut conn).await;
                match result {
                    Ok(response) => {
                        debug!(response = %response, "Redis health check successful");
                        Ok(response == "PONG")
                    }
                    Err(e) => {
                        warn!(error = %e, "Redis health check failed");
                        Ok(false)
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "Redis connection failed");
                Ok(false)
            }
        }
    }

    /// Delete all keys matching a pattern
    pub async fn delete_pattern(&self, pattern: &str) -> Result<u64> {
        let mut conn = self.get_connection().await?;
        let full_pattern = format!("{}{}", self.settings.redis.prefix, pattern);

        let keys: Vec<String> = conn.keys(&full_pattern).await
            .map_err(TalentGateError::Redis)?;

        if keys.is_empty() {
            return Ok(0);
        }

        let deleted: u64 = conn.del(&keys).await
            .map_err(TalentGateError::Redis)?;

        info!(pattern = %pattern, deleted = deleted, "Keys deleted by pattern");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_redis_service_creation() {
        let settings = Settings::default();
        let result = RedisService::new(settings);

        // This test will fail if Redis is not available, which is expected in CI
        match result {
            Ok(_) => println!("Redis service created successfully"),
            Err(e) => println!("Redis service creation failed (expected in test env): {}", e),
        }
    }
}
