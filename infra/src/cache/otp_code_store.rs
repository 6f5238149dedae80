//! Redis-backed storage for codes awaiting verification

use async_trait::async_trait;

use crate::otp::OtpCodeStore;

use super::redis_client::RedisClient;

/// Key namespace for pending codes
const CODE_KEY_PREFIX: &str = "otp_code";

/// Key namespace for failed guesses against the pending code
const MISS_KEY_PREFIX: &str = "otp_code_misses";

/// Keeps the latest code per mobile under `otp_code:{mobile}` with a TTL,
/// and its failed guess count under `otp_code_misses:{mobile}`
#[derive(Clone)]
pub struct RedisOtpCodeStore {
    client: RedisClient,
}

impl RedisOtpCodeStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn code_key(&self, mobile: &str) -> String {
        self.client.key(&format!("{}:{}", CODE_KEY_PREFIX, mobile))
    }

    fn miss_key(&self, mobile: &str) -> String {
        self.client.key(&format!("{}:{}", MISS_KEY_PREFIX, mobile))
    }
}

#[async_trait]
impl OtpCodeStore for RedisOtpCodeStore {
    async fn put(&self, mobile: &str, code: &str, ttl_seconds: u64) -> Result<(), String> {
        self.client.delete(&self.miss_key(mobile)).await.map_err(|e| e.to_string())?;
        self.client
            .set_with_expiry(&self.code_key(mobile), code, ttl_seconds)
            .await
            .map_err(|e| e.to_string())
    }

    async fn get(&self, mobile: &str) -> Result<Option<String>, String> {
        self.client.get(&self.code_key(mobile)).await.map_err(|e| e.to_string())
    }

    async fn record_miss(&self, mobile: &str, ttl_seconds: u64) -> Result<u32, String> {
        let misses = self
            .client
            .increment_with_expiry(&self.miss_key(mobile), ttl_seconds)
            .await
            .map_err(|e| e.to_string())?;
        Ok(u32::try_from(misses).unwrap_or(u32::MAX))
    }

    async fn remove(&self, mobile: &str) -> Result<(), String> {
        for key in [self.code_key(mobile), self.miss_key(mobile)] {
            self.client.delete(&key).await.map_err(|e| e.to_string())?;
        }
        Ok(())
    }
}
