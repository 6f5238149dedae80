//! Unit tests for the OTP issuance service

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::OtpSessionState;
use crate::errors::{DomainError, OtpError};
use crate::services::otp::{
    InMemoryOtpSessionStore, MockOtpProvider, OtpIssuanceConfig, OtpIssuanceService, OtpSessionStore,
    SentOtp,
};

const MOBILE: &str = "09123456789";

fn service(provider: Arc<MockOtpProvider>) -> OtpIssuanceService<MockOtpProvider> {
    OtpIssuanceService::new(provider, OtpIssuanceConfig::default())
}

#[tokio::test]
async fn test_first_request_sends_and_records_timestamp() {
    let provider = Arc::new(MockOtpProvider::new());
    let service = service(provider.clone());
    let now = Utc::now();

    let issued = service
        .request_otp_at(MOBILE, OtpSessionState::new(), now)
        .await
        .unwrap();

    assert_eq!(issued.session.otp_last_sent_at, Some(now));
    assert_eq!(issued.sent_at, now);
    assert_eq!(issued.next_send_at, now + Duration::seconds(60));
    assert_eq!(
        provider.sent().await,
        vec![SentOtp { mobile: MOBILE.to_string(), is_resend: true }]
    );
}

#[tokio::test]
async fn test_request_within_cooldown_is_rejected_without_sending() {
    let provider = Arc::new(MockOtpProvider::new());
    let service = service(provider.clone());
    let now = Utc::now();
    let session = OtpSessionState::sent_at(now - Duration::seconds(30));

    let result = service.request_otp_at(MOBILE, session, now).await;

    match result {
        Err(DomainError::Otp(OtpError::CooldownActive { seconds_left })) => assert_eq!(seconds_left, 30),
        other => panic!("Expected cooldown error, got {:?}", other),
    }
    assert_eq!(provider.send_count().await, 0);
}

#[tokio::test]
async fn test_request_after_cooldown_sends_again() {
    let provider = Arc::new(MockOtpProvider::new());
    let service = service(provider.clone());
    let now = Utc::now();
    let session = OtpSessionState::sent_at(now - Duration::seconds(60));

    let issued = service.request_otp_at(MOBILE, session, now).await.unwrap();

    assert_eq!(issued.session.otp_last_sent_at, Some(now));
    assert_eq!(provider.send_count().await, 1);
}

#[tokio::test]
async fn test_sub_second_remainder_is_truncated() {
    let provider = Arc::new(MockOtpProvider::new());
    let service = service(provider.clone());
    let now = Utc::now();
    let session = OtpSessionState::sent_at(now - Duration::milliseconds(59_900));

    let result = service.request_otp_at(MOBILE, session, now).await;

    assert!(matches!(
        result,
        Err(DomainError::Otp(OtpError::CooldownActive { seconds_left: 1 }))
    ));
}

#[tokio::test]
async fn test_future_timestamp_blocks_full_window() {
    let provider = Arc::new(MockOtpProvider::new());
    let service = service(provider.clone());
    let now = Utc::now();
    let session = OtpSessionState::sent_at(now + Duration::seconds(10));

    let result = service.request_otp_at(MOBILE, session, now).await;

    assert!(matches!(
        result,
        Err(DomainError::Otp(OtpError::CooldownActive { seconds_left: 60 }))
    ));
    assert_eq!(provider.send_count().await, 0);
}

#[tokio::test]
async fn test_provider_failure_surfaces_and_keeps_cooldown_unconsumed() {
    let provider = Arc::new(MockOtpProvider::new());
    provider.set_send_failure(true);
    let service = service(provider.clone());
    let store = InMemoryOtpSessionStore::new();

    let result = service.request_otp_in_session(&store, "sid-1", MOBILE).await;

    assert!(matches!(
        result,
        Err(DomainError::Otp(OtpError::ProviderFailure { .. }))
    ));
    assert_eq!(store.get("sid-1").await, None);

    provider.set_send_failure(false);
    let issued = service.request_otp_in_session(&store, "sid-1", MOBILE).await.unwrap();
    assert_eq!(store.get("sid-1").await, Some(issued.session));
}

#[tokio::test]
async fn test_resend_flag_follows_config() {
    let provider = Arc::new(MockOtpProvider::new());
    let service = OtpIssuanceService::new(
        provider.clone(),
        OtpIssuanceConfig { cooldown_seconds: 60, resend_flag: false },
    );

    service.request_otp(MOBILE, OtpSessionState::new()).await.unwrap();

    assert!(!provider.sent().await[0].is_resend);
}

#[tokio::test]
async fn test_custom_cooldown_window() {
    let provider = Arc::new(MockOtpProvider::new());
    let service = OtpIssuanceService::new(
        provider,
        OtpIssuanceConfig { cooldown_seconds: 120, resend_flag: true },
    );
    let now = Utc::now();
    let session = OtpSessionState::sent_at(now - Duration::seconds(90));

    assert_eq!(service.cooldown_remaining(&session, now), 30);
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let provider = Arc::new(MockOtpProvider::new());
    let service = service(provider.clone());
    let store = InMemoryOtpSessionStore::new();

    service.request_otp_in_session(&store, "sid-a", MOBILE).await.unwrap();
    let second_in_same = service.request_otp_in_session(&store, "sid-a", MOBILE).await;
    let first_in_other = service.request_otp_in_session(&store, "sid-b", MOBILE).await;

    assert!(matches!(
        second_in_same,
        Err(DomainError::Otp(OtpError::CooldownActive { .. }))
    ));
    assert!(first_in_other.is_ok());
    assert_eq!(provider.send_count().await, 2);
    assert!(store.load("sid-c").await.unwrap().otp_last_sent_at.is_none());
}
