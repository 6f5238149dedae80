//! OTP issuance service implementation

use chrono::{DateTime, Duration, Utc};
use pd_shared::mobile::mask_mobile;
use std::sync::Arc;

use crate::domain::entities::OtpSessionState;
use crate::errors::{DomainError, DomainResult, OtpError};

use super::config::OtpIssuanceConfig;
use super::traits::{OtpProvider, OtpSessionStore};
use super::types::OtpIssued;

/// Issuance service enforcing the per-session cooldown before each send
pub struct OtpIssuanceService<P: OtpProvider> {
    /// Provider delivering the codes
    provider: Arc<P>,
    /// Service configuration
    config: OtpIssuanceConfig,
}

impl<P: OtpProvider> OtpIssuanceService<P> {
    /// Create a new issuance service
    pub fn new(provider: Arc<P>, config: OtpIssuanceConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &OtpIssuanceConfig {
        &self.config
    }

    /// Seconds the session still has to wait, zero when a send is allowed
    pub fn cooldown_remaining(&self, session: &OtpSessionState, now: DateTime<Utc>) -> u64 {
        session.cooldown_remaining(now, self.config.cooldown_seconds)
    }

    /// Send a code to `mobile` unless the session is still cooling down
    pub async fn request_otp(&self, mobile: &str, session: OtpSessionState) -> DomainResult<OtpIssued> {
        self.request_otp_at(mobile, session, Utc::now()).await
    }

    /// Same as [`request_otp`](Self::request_otp) with an explicit clock
    ///
    /// # Returns
    ///
    /// * `Ok(OtpIssued)` - Provider accepted the send; carries the new session state
    /// * `Err(OtpError::CooldownActive)` - Provider was not called
    /// * `Err(OtpError::ProviderFailure)` - Send failed; the session state must not change
    pub async fn request_otp_at(
        &self,
        mobile: &str,
        session: OtpSessionState,
        now: DateTime<Utc>,
    ) -> DomainResult<OtpIssued> {
        let seconds_left = self.cooldown_remaining(&session, now);
        if seconds_left > 0 {
            tracing::warn!(
                mobile = %mask_mobile(mobile),
                seconds_left = seconds_left,
                event = "otp_cooldown_active",
                "OTP requested before the cooldown elapsed"
            );
            return Err(OtpError::CooldownActive { seconds_left }.into());
        }

        self.provider
            .send_otp(mobile, self.config.resend_flag)
            .await
            .map_err(|e| {
                tracing::error!(
                    mobile = %mask_mobile(mobile),
                    error = %e,
                    event = "otp_send_failed",
                    "OTP provider failed to send code"
                );
                OtpError::ProviderFailure { message: e }
            })?;

        tracing::info!(
            mobile = %mask_mobile(mobile),
            is_resend = self.config.resend_flag,
            event = "otp_sent",
            "OTP sent"
        );

        Ok(OtpIssued {
            session: OtpSessionState::sent_at(now),
            sent_at: now,
            next_send_at: now + Duration::seconds(self.config.cooldown_seconds as i64),
        })
    }

    /// Load the session's state, run [`request_otp`](Self::request_otp) and
    /// store the new state when the send succeeds
    pub async fn request_otp_in_session<S>(
        &self,
        store: &S,
        session_id: &str,
        mobile: &str,
    ) -> DomainResult<OtpIssued>
    where
        S: OtpSessionStore + ?Sized,
    {
        let session = store.load(session_id).await.map_err(|e| {
            tracing::error!(error = %e, event = "otp_session_load_failed", "Failed to load OTP session state");
            DomainError::internal(format!("Failed to load OTP session: {}", e))
        })?;

        let issued = self.request_otp(mobile, session).await?;

        store.store(session_id, &issued.session).await.map_err(|e| {
            tracing::error!(error = %e, event = "otp_session_store_failed", "Failed to store OTP session state");
            DomainError::internal(format!("Failed to store OTP session: {}", e))
        })?;

        Ok(issued)
    }
}
