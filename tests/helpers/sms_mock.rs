//! Mock SMS gateway server for testing
//!
//! This module provides a mock HTTP server that simulates the SMS gateway
//! API for testing purposes. It uses wiremock to create configurable mock
//! responses.

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Mock SMS gateway server for testing
pub struct SmsMockServer {
    pub server: MockServer,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub success: bool,
    pub delay_ms: Option<u64>,
    pub custom_response: Option<Value>,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            success: true,
            delay_ms: None,
            custom_response: None,
        }
    }
}

impl SmsMockServer {
    /// Create a new mock SMS gateway server
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Gateway endpoint URL for the service settings
    pub fn api_url(&self) -> String {
        format!("{}/v1/messages", self.server.uri())
    }

    /// Setup mock for the message dispatch endpoint
    pub async fn mock_dispatch(&self, config: MockResponseConfig) {
        let response_body = config.custom_response.unwrap_or_else(|| {
            if config.success {
                json!({
                    "ok": true,
                    "message_id": "msg-test-1",
                    "error": null
                })
            } else {
                json!({
                    "ok": false,
                    "message_id": null,
                    "error": "invalid recipient"
                })
            }
        });

        let mut response = ResponseTemplate::new(200).set_body_json(response_body);

        if let Some(delay) = config.delay_ms {
            response = response.set_delay(std::time::Duration::from_millis(delay));
        }

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Setup mock returning an HTTP error status
    pub async fn mock_http_error(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(status).set_body_string("gateway exploded"))
            .mount(&self.server)
            .await;
    }

    /// Setup mock returning a non-JSON body
    pub async fn mock_garbage_body(&self) {
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&self.server)
            .await;
    }
}
