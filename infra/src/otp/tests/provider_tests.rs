//! Tests for the code-generating OTP provider

use async_trait::async_trait;
use pd_core::OtpProvider;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::otp::{CodeOtpConfig, CodeOtpProvider, OtpCodeStore};
use crate::sms::LogSmsSender;

const MOBILE: &str = "09123456789";

#[derive(Default)]
struct MemoryCodeStore {
    codes: Mutex<HashMap<String, (String, u64)>>,
    misses: Mutex<HashMap<String, u32>>,
}

impl MemoryCodeStore {
    async fn pending(&self, mobile: &str) -> Option<(String, u64)> {
        self.codes.lock().await.get(mobile).cloned()
    }
}

#[async_trait]
impl OtpCodeStore for MemoryCodeStore {
    async fn put(&self, mobile: &str, code: &str, ttl_seconds: u64) -> Result<(), String> {
        self.misses.lock().await.remove(mobile);
        self.codes
            .lock()
            .await
            .insert(mobile.to_string(), (code.to_string(), ttl_seconds));
        Ok(())
    }

    async fn get(&self, mobile: &str) -> Result<Option<String>, String> {
        Ok(self.pending(mobile).await.map(|(code, _)| code))
    }

    async fn record_miss(&self, mobile: &str, _ttl_seconds: u64) -> Result<u32, String> {
        let mut misses = self.misses.lock().await;
        let count = misses.entry(mobile.to_string()).or_insert(0);
        *count += 1;
        Ok(*count)
    }

    async fn remove(&self, mobile: &str) -> Result<(), String> {
        self.codes.lock().await.remove(mobile);
        self.misses.lock().await.remove(mobile);
        Ok(())
    }
}

fn provider() -> (
    CodeOtpProvider<MemoryCodeStore, LogSmsSender>,
    Arc<MemoryCodeStore>,
    Arc<LogSmsSender>,
) {
    let store = Arc::new(MemoryCodeStore::default());
    let sms = Arc::new(LogSmsSender::new());
    let provider = CodeOtpProvider::new(store.clone(), sms.clone(), CodeOtpConfig::default());
    (provider, store, sms)
}

#[tokio::test]
async fn test_send_stores_numeric_code_with_ttl() {
    let (provider, store, sms) = provider();

    provider.send_otp(MOBILE, false).await.unwrap();

    let (code, ttl) = store.pending(MOBILE).await.unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(ttl, 120);
    assert_eq!(sms.message_count(), 1);
}

#[tokio::test]
async fn test_resend_replaces_pending_code() {
    let (provider, store, _) = provider();

    store.put(MOBILE, "000000", 120).await.unwrap();
    provider.send_otp(MOBILE, true).await.unwrap();

    let (code, _) = store.pending(MOBILE).await.unwrap();
    if code != "000000" {
        assert!(!provider.verify_otp(MOBILE, "000000").await.unwrap());
    }
    assert!(provider.verify_otp(MOBILE, &code).await.unwrap());
}

#[tokio::test]
async fn test_match_stays_pending_until_consumed() {
    let (provider, store, _) = provider();
    provider.send_otp(MOBILE, true).await.unwrap();
    let (code, _) = store.pending(MOBILE).await.unwrap();

    assert!(provider.verify_otp(MOBILE, &code).await.unwrap());
    assert!(provider.verify_otp(MOBILE, &code).await.unwrap());

    provider.consume_otp(MOBILE).await.unwrap();

    assert!(!provider.verify_otp(MOBILE, &code).await.unwrap());
    assert!(store.pending(MOBILE).await.is_none());
}

#[tokio::test]
async fn test_wrong_guesses_exhaust_pending_code() {
    let (provider, store, _) = provider();
    store.put(MOBILE, "445566", 120).await.unwrap();

    assert!(!provider.verify_otp(MOBILE, "445567").await.unwrap());
    assert!(!provider.verify_otp(MOBILE, "44556").await.unwrap());
    assert!(store.pending(MOBILE).await.is_some());

    assert!(!provider.verify_otp(MOBILE, "000000").await.unwrap());
    assert!(store.pending(MOBILE).await.is_none());
    assert!(!provider.verify_otp(MOBILE, "445566").await.unwrap());
}

#[tokio::test]
async fn test_brute_force_never_reaches_real_code() {
    let (provider, store, _) = provider();
    provider.send_otp(MOBILE, false).await.unwrap();
    let (code, _) = store.pending(MOBILE).await.unwrap();

    for candidate in (0..1000u32).map(|n| format!("{:06}", n)).filter(|c| *c != code) {
        assert!(!provider.verify_otp(MOBILE, &candidate).await.unwrap());
    }

    assert!(!provider.verify_otp(MOBILE, &code).await.unwrap());
}

#[tokio::test]
async fn test_new_code_resets_guess_count() {
    let (provider, store, _) = provider();
    store.put(MOBILE, "445566", 120).await.unwrap();
    assert!(!provider.verify_otp(MOBILE, "111111").await.unwrap());
    assert!(!provider.verify_otp(MOBILE, "222222").await.unwrap());

    store.put(MOBILE, "778899", 120).await.unwrap();
    assert!(!provider.verify_otp(MOBILE, "333333").await.unwrap());
    assert!(!provider.verify_otp(MOBILE, "444444").await.unwrap());

    assert!(provider.verify_otp(MOBILE, "778899").await.unwrap());
}

#[tokio::test]
async fn test_attempt_limit_follows_config() {
    let store = Arc::new(MemoryCodeStore::default());
    let provider = CodeOtpProvider::new(
        store.clone(),
        Arc::new(LogSmsSender::new()),
        CodeOtpConfig {
            max_attempts: 1,
            ..CodeOtpConfig::default()
        },
    );
    store.put(MOBILE, "445566", 120).await.unwrap();

    assert!(!provider.verify_otp(MOBILE, "445567").await.unwrap());
    assert!(store.pending(MOBILE).await.is_none());
}

#[tokio::test]
async fn test_unknown_mobile_fails_verification() {
    let (provider, _, _) = provider();
    assert!(!provider.verify_otp(MOBILE, "123456").await.unwrap());
}

#[tokio::test]
async fn test_failed_delivery_drops_code() {
    let (provider, store, sms) = provider();
    sms.set_simulate_failure(true);

    let result = provider.send_otp(MOBILE, false).await;

    assert!(result.is_err());
    assert!(store.pending(MOBILE).await.is_none());
}

#[tokio::test]
async fn test_code_length_follows_config() {
    let store = Arc::new(MemoryCodeStore::default());
    let provider = CodeOtpProvider::new(
        store.clone(),
        Arc::new(LogSmsSender::new()),
        CodeOtpConfig {
            code_length: 4,
            ttl_seconds: 60,
            max_attempts: 3,
        },
    );

    provider.send_otp(MOBILE, false).await.unwrap();

    assert_eq!(store.pending(MOBILE).await.unwrap().0.len(), 4);
}
