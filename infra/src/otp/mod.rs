//! OTP provider that generates codes locally and delivers them by SMS
//!
//! Codes are numeric, drawn from the OS random source and stored per mobile
//! with a TTL. A code is dropped after too many wrong guesses, and spent
//! once the caller commits the change it verified.

use async_trait::async_trait;
use constant_time_eq::constant_time_eq;
use pd_core::OtpProvider;
use pd_shared::mobile::mask_mobile;
use pd_shared::OtpConfig;
use rand::{rngs::OsRng, Rng};
use std::sync::Arc;

use crate::sms::SmsSender;

#[cfg(test)]
mod tests;

/// Trait for storage of codes awaiting verification
#[async_trait]
pub trait OtpCodeStore: Send + Sync {
    /// Replace the pending code for a mobile
    async fn put(&self, mobile: &str, code: &str, ttl_seconds: u64) -> Result<(), String>;
    /// Pending code for a mobile, `None` when missing or expired
    async fn get(&self, mobile: &str) -> Result<Option<String>, String>;
    /// Count one wrong guess against the pending code, returning the total
    async fn record_miss(&self, mobile: &str, ttl_seconds: u64) -> Result<u32, String>;
    /// Drop the pending code for a mobile along with its guess count
    async fn remove(&self, mobile: &str) -> Result<(), String>;
}

/// Code generation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeOtpConfig {
    /// Number of digits per code
    pub code_length: usize,
    /// Lifetime of a code in seconds
    pub ttl_seconds: u64,
    /// Wrong guesses after which the pending code is dropped
    pub max_attempts: u32,
}

impl Default for CodeOtpConfig {
    fn default() -> Self {
        Self {
            code_length: 6,
            ttl_seconds: 120,
            max_attempts: 3,
        }
    }
}

impl From<&OtpConfig> for CodeOtpConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_length: config.code_length,
            ttl_seconds: config.code_ttl_seconds,
            max_attempts: config.max_attempts,
        }
    }
}

/// [`OtpProvider`] backed by a code store and an SMS sender
pub struct CodeOtpProvider<C: OtpCodeStore, S: SmsSender> {
    codes: Arc<C>,
    sms: Arc<S>,
    config: CodeOtpConfig,
}

impl<C: OtpCodeStore, S: SmsSender> CodeOtpProvider<C, S> {
    pub fn new(codes: Arc<C>, sms: Arc<S>, config: CodeOtpConfig) -> Self {
        Self { codes, sms, config }
    }

    /// Generate a numeric code using the OS random source
    fn generate_code(&self) -> String {
        let mut rng = OsRng;
        (0..self.config.code_length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }
}

#[async_trait]
impl<C: OtpCodeStore, S: SmsSender> OtpProvider for CodeOtpProvider<C, S> {
    async fn send_otp(&self, mobile: &str, is_resend: bool) -> Result<(), String> {
        let code = self.generate_code();

        // A new code always replaces the pending one
        self.codes.put(mobile, &code, self.config.ttl_seconds).await?;

        match self.sms.send_otp_code(mobile, &code, self.config.ttl_seconds).await {
            Ok(message_id) => {
                tracing::info!(
                    mobile = %mask_mobile(mobile),
                    is_resend = is_resend,
                    provider = self.sms.provider_name(),
                    message_id = %message_id,
                    event = "otp_code_delivered",
                    "OTP code handed to SMS provider"
                );
                Ok(())
            }
            Err(e) => {
                // Drop the undeliverable code so it cannot be guessed later
                if let Err(cleanup) = self.codes.remove(mobile).await {
                    tracing::warn!(error = %cleanup, "Failed to drop undelivered OTP code");
                }
                Err(e.to_string())
            }
        }
    }

    async fn verify_otp(&self, mobile: &str, code: &str) -> Result<bool, String> {
        let Some(expected) = self.codes.get(mobile).await? else {
            tracing::debug!(mobile = %mask_mobile(mobile), event = "otp_code_missing", "No pending OTP code");
            return Ok(false);
        };

        if constant_time_eq(expected.as_bytes(), code.as_bytes()) {
            return Ok(true);
        }

        let misses = self.codes.record_miss(mobile, self.config.ttl_seconds).await?;
        if misses >= self.config.max_attempts {
            self.codes.remove(mobile).await?;
            tracing::warn!(
                mobile = %mask_mobile(mobile),
                misses = misses,
                event = "otp_code_exhausted",
                "OTP code dropped after too many wrong guesses"
            );
        }
        Ok(false)
    }

    async fn consume_otp(&self, mobile: &str) -> Result<(), String> {
        self.codes.remove(mobile).await
    }
}
