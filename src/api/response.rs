//! API response envelope
//!
//! Every endpoint answers with the same `{success, data, message}`
//! envelope the clients expect.

use serde::{Deserialize, Serialize};

/// Uniform response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying data
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Successful response with a user-facing message
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

impl ApiResponse<()> {
    /// Successful response without a payload
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            message: None,
        }
    }

    /// Failed response with a user-facing message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Paginated list payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: i64, page: i64, per_page: i64) -> Self {
        Self {
            items,
            total,
            page,
            per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope_shape() {
        let response = ApiResponse::ok(serde_json::json!({"id": 1}));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], serde_json::json!(true));
        assert_eq!(value["data"]["id"], serde_json::json!(1));
        assert_eq!(value["message"], serde_json::Value::Null);
    }

    #[test]
    fn test_error_envelope_shape() {
        let response = ApiResponse::error("something went wrong");
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], serde_json::json!(false));
        assert_eq!(value["data"], serde_json::Value::Null);
        assert_eq!(value["message"], serde_json::json!("something went wrong"));
    }
}
