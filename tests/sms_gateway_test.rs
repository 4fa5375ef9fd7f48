//! SMS gateway client integration tests
//!
//! Drives the SMS service against a wiremock gateway and verifies the
//! error mapping for every failure class.

mod helpers;

use assert_matches::assert_matches;
use helpers::{live_sms_settings, MockResponseConfig, SmsMockServer};
use TalentGate::services::SmsService;
use TalentGate::utils::errors::{SmsError, TalentGateError};

#[tokio::test]
async fn test_successful_dispatch() {
    let mock = SmsMockServer::new().await;
    mock.mock_dispatch(MockResponseConfig::default()).await;

    let service = SmsService::new(live_sms_settings(&mock.api_url())).unwrap();
    let receipt = service.send("+905321234567", "code 123456").await.unwrap();

    assert!(!receipt.dry_run);
    assert_eq!(receipt.message_id.as_deref(), Some("msg-test-1"));
}

#[tokio::test]
async fn test_gateway_rejection_maps_to_request_failed() {
    let mock = SmsMockServer::new().await;
    mock.mock_dispatch(MockResponseConfig {
        success: false,
        ..Default::default()
    })
    .await;

    let service = SmsService::new(live_sms_settings(&mock.api_url())).unwrap();
    let error = service.send("+905321234567", "code").await.unwrap_err();

    assert_matches!(error, TalentGateError::Sms(SmsError::RequestFailed(reason)) => {
        assert!(reason.contains("invalid recipient"));
    });
}

#[tokio::test]
async fn test_http_error_maps_to_request_failed() {
    let mock = SmsMockServer::new().await;
    mock.mock_http_error(500).await;

    let service = SmsService::new(live_sms_settings(&mock.api_url())).unwrap();
    let error = service.send("+905321234567", "code").await.unwrap_err();

    assert_matches!(error, TalentGateError::Sms(SmsError::RequestFailed(reason)) => {
        assert!(reason.contains("500"));
    });
}

#[tokio::test]
async fn test_timeout_maps_to_timeout() {
    let mock = SmsMockServer::new().await;
    // The client timeout in test settings is one second
    mock.mock_dispatch(MockResponseConfig {
        delay_ms: Some(2_000),
        ..Default::default()
    })
    .await;

    let service = SmsService::new(live_sms_settings(&mock.api_url())).unwrap();
    let error = service.send("+905321234567", "code").await.unwrap_err();

    assert_matches!(error, TalentGateError::Sms(SmsError::Timeout));
}

#[tokio::test]
async fn test_garbage_body_maps_to_invalid_response() {
    let mock = SmsMockServer::new().await;
    mock.mock_garbage_body().await;

    let service = SmsService::new(live_sms_settings(&mock.api_url())).unwrap();
    let error = service.send("+905321234567", "code").await.unwrap_err();

    assert_matches!(error, TalentGateError::Sms(SmsError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_dry_run_never_touches_the_gateway() {
    let mock = SmsMockServer::new().await;
    // No mock mounted: any request would 404 and fail the send

    let mut settings = live_sms_settings(&mock.api_url());
    settings.sms.dry_run = true;

    let service = SmsService::new(settings).unwrap();
    let receipt = service.send("+905321234567", "code").await.unwrap();

    assert!(receipt.dry_run);
}
