use std::time::Duration;

use voice_transcription_api::presentation::{Environment, Settings};

#[test]
fn given_no_overrides_when_loading_defaults_then_matches_documented_values() {
    let settings = Settings::defaults(Environment::Development).unwrap();

    assert_eq!(settings.environment, Environment::Development);
    assert_eq!(settings.server.port, 3000);
    assert_eq!(settings.upload.max_file_size_bytes, 10 * 1024 * 1024);
    assert!(settings.upload.allowed_mime_types.contains(&"audio/wav".to_string()));
    assert_eq!(settings.polling.interval_ms, 1000);
    assert_eq!(settings.polling.max_attempts, 60);
    assert_eq!(settings.rate_limit.max_requests, 100);
    assert_eq!(settings.rate_limit.window_secs, 900);
    assert_eq!(settings.vendor.language_code, "en");
    assert!(!settings.logging.json_format);
}

#[test]
fn given_production_when_loading_defaults_then_logs_as_json() {
    let settings = Settings::defaults(Environment::Production).unwrap();

    assert!(settings.logging.json_format);
}

#[test]
fn given_missing_api_key_when_validating_then_rejects_settings() {
    let settings = Settings::defaults(Environment::Test).unwrap();

    let error = settings.validate().unwrap_err();

    assert!(error.contains("ASSEMBLYAI_API_KEY"));
}

#[test]
fn given_api_key_when_validating_then_accepts_settings() {
    let mut settings = Settings::defaults(Environment::Test).unwrap();
    settings.vendor.api_key = "key".to_string();

    assert!(settings.validate().is_ok());
}

#[test]
fn given_zero_failure_cutoff_when_building_polling_policy_then_cutoff_is_disabled() {
    let mut settings = Settings::defaults(Environment::Test).unwrap();
    settings.polling.interval_ms = 250;
    settings.polling.max_attempts = 8;

    let policy = settings.polling_policy();
    assert_eq!(policy.interval, Duration::from_millis(250));
    assert_eq!(policy.max_attempts, 8);
    assert_eq!(policy.max_consecutive_failures, None);

    settings.polling.max_consecutive_failures = 3;
    assert_eq!(settings.polling_policy().max_consecutive_failures, Some(3));
}

#[test]
fn given_settings_when_debug_formatted_then_api_key_is_hidden() {
    let mut settings = Settings::defaults(Environment::Test).unwrap();
    settings.vendor.api_key = "very-secret".to_string();

    assert!(!format!("{:?}", settings).contains("very-secret"));
}

#[test]
fn given_settings_when_deriving_vendor_config_then_uses_vendor_section() {
    let mut settings = Settings::defaults(Environment::Test).unwrap();
    settings.vendor.api_key = "key".to_string();
    settings.vendor.base_url = "http://localhost:9/v2/".to_string();

    let config = settings.vendor_config();

    assert_eq!(config.api_key, "key");
    assert_eq!(config.base_url, "http://localhost:9/v2");
    assert_eq!(config.request_timeout, Duration::from_secs(30));
}

#[test]
fn given_zero_poll_attempts_when_validating_then_rejects_settings() {
    let mut settings = Settings::defaults(Environment::Test).unwrap();
    settings.vendor.api_key = "key".to_string();
    settings.polling.max_attempts = 0;

    let error = settings.validate().unwrap_err();

    assert!(error.contains("polling.max_attempts"));
}

#[test]
fn given_zero_poll_interval_when_validating_then_rejects_settings() {
    let mut settings = Settings::defaults(Environment::Test).unwrap();
    settings.vendor.api_key = "key".to_string();
    settings.polling.interval_ms = 0;

    let error = settings.validate().unwrap_err();

    assert!(error.contains("polling.interval_ms"));
}
