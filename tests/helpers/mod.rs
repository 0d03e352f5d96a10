#![allow(dead_code)]

pub mod multipart;

use axum::body::Body;
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::Value;

use voice_transcription_api::presentation::{Environment, Settings};

pub fn test_settings() -> Settings {
    settings_for(Environment::Test)
}

pub fn settings_for(environment: Environment) -> Settings {
    let mut settings = Settings::defaults(environment).unwrap();
    settings.vendor.api_key = mock_vendor_server::TEST_API_KEY.to_string();
    settings.polling.interval_ms = 10;
    settings.polling.max_attempts = 5;
    settings
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
