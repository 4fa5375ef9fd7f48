//! Settings loading tests
//!
//! Loads the fixture TOML through the config crate the same way the
//! binary does and validates the deserialized tree.

mod fixtures;

use std::io::Write;
use TalentGate::config::Settings;

fn load_from_toml(content: &str) -> Result<Settings, config::ConfigError> {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    file.write_all(content.as_bytes()).expect("write settings");

    let settings = config::Config::builder()
        .add_source(config::File::from(file.path()))
        .build()?;

    settings.try_deserialize()
}

#[test]
fn test_full_settings_file_loads() {
    let settings = load_from_toml(fixtures::SETTINGS_TOML).expect("settings parse");

    assert_eq!(settings.server.port, 8081);
    assert_eq!(settings.database.max_connections, 5);
    assert_eq!(settings.redis.prefix, "talentgate:test:");
    assert_eq!(settings.auth.otp_length, 6);
    assert!(settings.sms.dry_run);
    assert_eq!(settings.i18n.supported_languages, vec!["en", "tr"]);
    assert!(settings.features.support_inbox);

    assert!(settings.validate().is_ok());
}

#[test]
fn test_missing_section_is_rejected() {
    let truncated = fixtures::SETTINGS_TOML.replace("[sms]", "[sms_other]");
    assert!(load_from_toml(&truncated).is_err());
}

#[test]
fn test_loaded_settings_fail_validation_when_weak() {
    let weak = fixtures::SETTINGS_TOML.replace(
        "jwt_secret = \"fixture-secret-fixture-secret-12345678\"",
        "jwt_secret = \"short\"",
    );

    let settings = load_from_toml(&weak).expect("settings parse");
    assert!(settings.validate().is_err());
}
