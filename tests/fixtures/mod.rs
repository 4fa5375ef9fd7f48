//! Test fixtures for integration tests
//!
//! Canned request payloads and a complete settings file used across the
//! test suites.

/// A complete settings TOML, as deployed configuration would look
pub const SETTINGS_TOML: &str = r#"
[server]
host = "127.0.0.1"
port = 8081
cors_origins = ["http://localhost:3000"]

[database]
url = "postgresql://localhost/talentgate_test"
max_connections = 5
min_connections = 1

[redis]
url = "redis://localhost:6379"
prefix = "talentgate:test:"
ttl_seconds = 600

[auth]
jwt_secret = "fixture-secret-fixture-secret-12345678"
token_ttl_hours = 2
otp_length = 6
otp_ttl_seconds = 120
otp_resend_cooldown_seconds = 30
otp_hourly_limit = 5

[sms]
api_url = "https://gateway.example.com/v1/messages"
sender_id = "TESTGATE"
timeout_seconds = 3
dry_run = true

[i18n]
default_language = "en"
supported_languages = ["en", "tr"]

[logging]
level = "debug"
file_path = "/tmp/talentgate-test-logs"

[features]
demo_data = false
support_inbox = true
"#;

/// Valid OTP send payload
pub fn otp_send_body(phone: &str) -> serde_json::Value {
    serde_json::json!({ "phone": phone })
}

/// Valid password login payload
pub fn login_body(email: &str, password: &str) -> serde_json::Value {
    serde_json::json!({ "email": email, "password": password })
}

/// Valid manager creation payload
pub fn create_manager_body(phone: &str) -> serde_json::Value {
    serde_json::json!({
        "full_name": "Fixture Manager",
        "phone": phone,
        "email": "fixture@example.com",
        "position": "Analyst",
        "status": "applicant"
    })
}
