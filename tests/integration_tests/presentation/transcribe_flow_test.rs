use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use axum::Router;
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use voice_transcription_api::infrastructure::vendor::AssemblyAiClient;
use voice_transcription_api::presentation::{AppState, create_router};

use crate::helpers::mock_vendor_server::{MockVendorServer, VendorScript};
use crate::helpers::multipart::{MultipartBuilder, wav_upload};
use crate::helpers::{json_body, test_settings};

fn router_against(server: &MockVendorServer) -> Router {
    let mut settings = test_settings();
    settings.vendor.base_url = server.base_url.clone();
    settings.vendor.request_timeout_secs = 5;

    let client = AssemblyAiClient::new(settings.vendor_config()).unwrap();
    create_router(AppState::new(settings, Arc::new(client)))
}

#[tokio::test]
async fn given_vendor_completes_job_when_transcribing_then_returns_transcript() {
    let server = MockVendorServer::start(VendorScript::completing("hello world", 0.95)).await;

    let response = router_against(&server)
        .oneshot(wav_upload(b"RIFF-audio"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["text"], "hello world");
    assert_eq!(body["confidence"], 0.95);
    assert!(body["processingTime"].as_u64().is_some());
    assert_eq!(
        *server.calls.uploaded_bytes.lock().unwrap(),
        b"RIFF-audio".to_vec()
    );
    assert_eq!(
        server.calls.submitted.lock().unwrap().as_ref().unwrap()["audio_url"],
        "https://cdn.example.test/upload/abc"
    );
}

#[tokio::test]
async fn given_job_queued_then_completed_when_transcribing_then_polls_until_done() {
    let server = MockVendorServer::start(VendorScript::default().with_polls(vec![
        (200, json!({"id": "job-1", "status": "queued"})),
        (200, json!({"id": "job-1", "status": "processing"})),
        (
            200,
            json!({"id": "job-1", "status": "completed", "text": "done", "confidence": 0.8}),
        ),
    ]))
    .await;

    let response = router_against(&server)
        .oneshot(wav_upload(b"RIFF"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["text"], "done");
    assert_eq!(server.calls.polls(), 3);
}

#[tokio::test]
async fn given_vendor_fails_job_when_transcribing_then_returns_transcription_error() {
    let server = MockVendorServer::start(VendorScript::default().with_polls(vec![(
        200,
        json!({"id": "job-1", "status": "error", "error": "bad audio"}),
    )]))
    .await;

    let response = router_against(&server)
        .oneshot(wav_upload(b"RIFF"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["code"], "TRANSCRIPTION_ERROR");
    assert!(body["error"].as_str().unwrap().contains("bad audio"));
}

#[tokio::test]
async fn given_vendor_throttles_submit_when_transcribing_then_returns_rate_limit() {
    let server = MockVendorServer::start(
        VendorScript::default().with_submit(429, json!({"error": "Too many requests"})),
    )
    .await;

    let response = router_against(&server)
        .oneshot(wav_upload(b"RIFF"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(json_body(response).await["code"], "RATE_LIMIT");
    assert_eq!(server.calls.polls(), 0);
}

#[tokio::test]
async fn given_job_never_finishes_when_transcribing_then_times_out_after_budget() {
    let server = MockVendorServer::start(VendorScript::default()).await;
    let started = Instant::now();

    let response = router_against(&server)
        .oneshot(wav_upload(b"RIFF"))
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(json_body(response).await["code"], "TRANSCRIPTION_TIMEOUT");
    assert_eq!(server.calls.polls(), 5);
    assert!(elapsed >= Duration::from_millis(40));
    assert!(elapsed < Duration::from_secs(5));
}

#[tokio::test]
async fn given_job_disappears_when_polling_then_returns_job_not_found() {
    let server = MockVendorServer::start(VendorScript::default().with_polls(vec![(
        404,
        json!({"error": "Transcript not found"}),
    )]))
    .await;

    let response = router_against(&server)
        .oneshot(wav_upload(b"RIFF"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(response).await["code"], "JOB_NOT_FOUND");
    assert_eq!(server.calls.polls(), 1);
}

#[tokio::test]
async fn given_transient_vendor_outage_when_polling_then_recovers() {
    let server = MockVendorServer::start(VendorScript::default().with_polls(vec![
        (503, json!({"error": "maintenance"})),
        (500, json!({"error": "boom"})),
        (
            200,
            json!({"id": "job-1", "status": "completed", "text": "back online"}),
        ),
    ]))
    .await;

    let response = router_against(&server)
        .oneshot(wav_upload(b"RIFF"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["text"], "back online");
    assert!(body["confidence"].is_null());
}

#[tokio::test]
async fn given_rejected_upload_when_transcribing_then_vendor_is_never_called() {
    let server = MockVendorServer::start(VendorScript::completing("unused", 0.5)).await;
    let request = MultipartBuilder::new()
        .file("audio", "notes.txt", "text/plain", b"not audio")
        .into_request("/api/transcribe");

    let response = router_against(&server).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["code"], "INVALID_FILE_TYPE");
    assert_eq!(server.calls.total(), 0);
    assert_eq!(server.calls.uploads.load(Ordering::SeqCst), 0);
}
