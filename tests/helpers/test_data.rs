//! Test data builders
//!
//! Settings and model builders shared by the integration tests.

use fake::faker::name::en::Name;
use fake::Fake;
use TalentGate::config::Settings;
use TalentGate::models::assessment::{QuestionKind, TemplateQuestion, TemplateStep};
use TalentGate::models::manager::{CreateManagerRequest, ManagerStatus};

/// Settings tuned for tests: dry-run SMS, short cooldowns, local services
pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.auth.jwt_secret = "integration-test-secret-0123456789abcdef".to_string();
    settings.auth.otp_resend_cooldown_seconds = 1;
    settings.auth.otp_ttl_seconds = 60;
    settings.sms.dry_run = true;
    settings.redis.prefix = format!("talentgate:test:{}:", std::process::id());
    settings
}

/// Settings pointing the SMS client at a mock gateway
pub fn live_sms_settings(api_url: &str) -> Settings {
    let mut settings = test_settings();
    settings.sms.dry_run = false;
    settings.sms.api_url = api_url.to_string();
    settings.sms.timeout_seconds = 1;
    settings
}

/// A valid E.164 phone with a per-test unique tail
pub fn unique_phone(tail: u32) -> String {
    format!("+9053200{:05}", tail)
}

/// Manager creation request with generated identity
pub fn manager_request(tail: u32) -> CreateManagerRequest {
    let full_name: String = Name().fake();

    CreateManagerRequest {
        full_name,
        phone: unique_phone(tail),
        email: Some(format!("manager{}@example.com", tail)),
        position: Some("Analyst".to_string()),
        status: Some(ManagerStatus::Applicant),
    }
}

/// A two-step template with one scorable question per step
pub fn sample_template_steps() -> Vec<TemplateStep> {
    vec![
        TemplateStep {
            title: "Screening".to_string(),
            questions: vec![
                TemplateQuestion {
                    prompt: "Pick the best option".to_string(),
                    kind: QuestionKind::SingleChoice,
                    options: vec!["wrong".to_string(), "right".to_string()],
                    expected: Some(1),
                },
                TemplateQuestion {
                    prompt: "Tell us about yourself".to_string(),
                    kind: QuestionKind::Text,
                    options: vec![],
                    expected: None,
                },
            ],
        },
        TemplateStep {
            title: "Wrap-up".to_string(),
            questions: vec![TemplateQuestion {
                prompt: "Pick again".to_string(),
                kind: QuestionKind::SingleChoice,
                options: vec!["right".to_string(), "wrong".to_string()],
                expected: Some(0),
            }],
        },
    ]
}
