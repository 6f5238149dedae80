//! In-memory provider and session store for tests and local wiring

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::{Mutex, RwLock};

use crate::domain::entities::OtpSessionState;

use super::traits::{OtpProvider, OtpSessionStore};

/// One recorded `send_otp` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentOtp {
    pub mobile: String,
    pub is_resend: bool,
}

/// Provider double that records sends and accepts preconfigured codes
#[derive(Default)]
pub struct MockOtpProvider {
    sent: Mutex<Vec<SentOtp>>,
    codes: Mutex<HashMap<String, String>>,
    verify_calls: AtomicUsize,
    consume_calls: AtomicUsize,
    fail_send: AtomicBool,
    fail_verify: AtomicBool,
}

impl MockOtpProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `code` the valid code for `mobile`
    pub async fn accept_code(&self, mobile: &str, code: &str) {
        self.codes.lock().await.insert(mobile.to_string(), code.to_string());
    }

    pub fn set_send_failure(&self, fail: bool) {
        self.fail_send.store(fail, Ordering::SeqCst);
    }

    pub fn set_verify_failure(&self, fail: bool) {
        self.fail_verify.store(fail, Ordering::SeqCst);
    }

    /// Every successful send so far
    pub async fn sent(&self) -> Vec<SentOtp> {
        self.sent.lock().await.clone()
    }

    pub async fn send_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }

    pub fn consume_calls(&self) -> usize {
        self.consume_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OtpProvider for MockOtpProvider {
    async fn send_otp(&self, mobile: &str, is_resend: bool) -> Result<(), String> {
        if self.fail_send.load(Ordering::SeqCst) {
            return Err("OTP gateway unavailable".to_string());
        }
        self.sent.lock().await.push(SentOtp {
            mobile: mobile.to_string(),
            is_resend,
        });
        Ok(())
    }

    async fn verify_otp(&self, mobile: &str, code: &str) -> Result<bool, String> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_verify.load(Ordering::SeqCst) {
            return Err("OTP gateway unavailable".to_string());
        }
        let codes = self.codes.lock().await;
        Ok(codes.get(mobile).map(|c| c == code).unwrap_or(false))
    }

    async fn consume_otp(&self, mobile: &str) -> Result<(), String> {
        self.consume_calls.fetch_add(1, Ordering::SeqCst);
        self.codes.lock().await.remove(mobile);
        Ok(())
    }
}

/// Session store keeping every session's state in a map
#[derive(Default)]
pub struct InMemoryOtpSessionStore {
    sessions: RwLock<HashMap<String, OtpSessionState>>,
}

impl InMemoryOtpSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of a session without going through the trait
    pub async fn get(&self, session_id: &str) -> Option<OtpSessionState> {
        self.sessions.read().await.get(session_id).copied()
    }
}

#[async_trait]
impl OtpSessionStore for InMemoryOtpSessionStore {
    async fn load(&self, session_id: &str) -> Result<OtpSessionState, String> {
        Ok(self.get(session_id).await.unwrap_or_default())
    }

    async fn store(&self, session_id: &str, state: &OtpSessionState) -> Result<(), String> {
        self.sessions
            .write()
            .await
            .insert(session_id.to_string(), *state);
        Ok(())
    }
}
