//! Redis-backed OTP session state

use async_trait::async_trait;

use pd_core::{OtpSessionState, OtpSessionStore};
use pd_shared::SessionConfig;

use crate::InfrastructureError;

use super::redis_client::RedisClient;

/// Stores each session's OTP state as JSON under `{prefix}:{session_id}`
///
/// Entries expire with the session so state never outlives it.
#[derive(Clone)]
pub struct RedisOtpSessionStore {
    client: RedisClient,
    key_prefix: String,
    ttl_seconds: u64,
}

impl RedisOtpSessionStore {
    pub fn new(client: RedisClient, config: &SessionConfig) -> Self {
        Self {
            client,
            key_prefix: config.key_prefix.clone(),
            ttl_seconds: config.timeout,
        }
    }

    fn session_key(&self, session_id: &str) -> String {
        self.client.key(&format!("{}:{}", self.key_prefix, session_id))
    }

    async fn load_state(&self, session_id: &str) -> Result<OtpSessionState, InfrastructureError> {
        match self.client.get(&self.session_key(session_id)).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(OtpSessionState::default()),
        }
    }

    async fn store_state(&self, session_id: &str, state: &OtpSessionState) -> Result<(), InfrastructureError> {
        let raw = serde_json::to_string(state)?;
        self.client
            .set_with_expiry(&self.session_key(session_id), &raw, self.ttl_seconds)
            .await
    }
}

#[async_trait]
impl OtpSessionStore for RedisOtpSessionStore {
    async fn load(&self, session_id: &str) -> Result<OtpSessionState, String> {
        self.load_state(session_id).await.map_err(|e| e.to_string())
    }

    async fn store(&self, session_id: &str, state: &OtpSessionState) -> Result<(), String> {
        self.store_state(session_id, state).await.map_err(|e| e.to_string())
    }
}
