//! SMS gateway service implementation
//!
//! This service handles delivery of one-time codes through the external
//! SMS gateway, including HTTP client setup, response parsing, dry-run
//! mode for development, and error handling.

use crate::config::settings::Settings;
use crate::utils::errors::{Result, SmsError, TalentGateError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Outgoing message payload for the gateway
#[derive(Debug, Clone, Serialize)]
pub struct SmsMessage {
    pub sender: String,
    pub recipient: String,
    pub body: String,
}

/// Gateway response structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsGatewayResponse {
    pub ok: bool,
    pub message_id: Option<String>,
    pub error: Option<String>,
}

/// Delivery receipt returned to callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsReceipt {
    pub message_id: Option<String>,
    pub dry_run: bool,
    pub sent_at: chrono::DateTime<chrono::Utc>,
}

/// SMS service for outbound text messages
#[derive(Clone)]
#[derive(Debug)]
pub struct SmsService {
    client: Client,
    settings: Settings,
}

impl SmsService {
    /// Create a new SmsService instance
    pub fn new(settings: Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.sms.timeout_seconds))
            .user_agent("TalentGate/1.0")
            .build()
            .map_err(TalentGateError::Http)?;

        Ok(Self { client, settings })
    }

    /// Send a text message to a phone number
    pub async fn send(&self, recipient: &str, body: &str) -> Result<SmsReceipt> {
        if self.settings.sms.dry_run {
            info!(recipient = %recipient, body = %body, "SMS dry-run, not dispatched");
            return Ok(SmsReceipt {
                message_id: None,
                dry_run: true,
                sent_at: chrono::Utc::now(),
            });
        }

        let message = SmsMessage {
            sender: self.settings.sms.sender_id.clone(),
            recipient: recipient.to_string(),
            body: body.to_string(),
        };

        let receipt = self.dispatch(&message).await?;
        Ok(receipt)
    }

    /// Make the actual gateway request
    async fn dispatch(&self, message: &SmsMessage) -> Result<SmsReceipt> {
        debug!(recipient = %message.recipient, url = %self.settings.sms.api_url, "Dispatching SMS");

        let response = self.client
            .post(&self.settings.sms.api_url)
            .json(message)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TalentGateError::Sms(SmsError::Timeout)
                } else if e.is_connect() {
                    TalentGateError::Sms(SmsError::ServiceUnavailable)
                } else {
                    TalentGateError::Sms(SmsError::RequestFailed(e.to_string()))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TalentGateError::Sms(SmsError::RequestFailed(
                format!("HTTP {}: {}", status, error_text)
            )));
        }

        let gateway_response: SmsGatewayResponse = response.json().await
            .map_err(|e| TalentGateError::Sms(SmsError::InvalidResponse(e.to_string())))?;

        if !gateway_response.ok {
            let reason = gateway_response.error.unwrap_or_else(|| "unknown gateway error".to_string());
            warn!(recipient = %message.recipient, reason = %reason, "SMS gateway rejected message");
            return Err(TalentGateError::Sms(SmsError::RequestFailed(reason)));
        }

        info!(recipient = %message.recipient, message_id = ?gateway_response.message_id, "SMS dispatched");

        Ok(SmsReceipt {
            message_id: gateway_response.message_id,
            dry_run: false,
            sent_at: chrono::Utc::now(),
        })
    }

    /// Check if the service is configured for real delivery
    pub fn is_live(&self) -> bool {
        !self.settings.sms.dry_run
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_response_deserialization() {
        let json = r#"{"ok": true, "message_id": "msg-42", "error": null}"#;
        let response: SmsGatewayResponse = serde_json::from_str(json).unwrap();
        assert!(response.ok);
        assert_eq!(response.message_id.as_deref(), Some("msg-42"));
    }

    #[test]
    fn test_gateway_response_error() {
        let json = r#"{"ok": false, "message_id": null, "error": "invalid recipient"}"#;
        let response: SmsGatewayResponse = serde_json::from_str(json).unwrap();
        assert!(!response.ok);
        assert_eq!(response.error.as_deref(), Some("invalid recipient"));
    }

    #[tokio::test]
    async fn test_dry_run_send() {
        let settings = Settings::default();
        assert!(settings.sms.dry_run);

        let service = SmsService::new(settings).unwrap();
        let receipt = service.send("+905321234567", "test").await.unwrap();

        assert!(receipt.dry_run);
        assert!(receipt.message_id.is_none());
    }
}
