//! Traits for OTP delivery and session state integration

use async_trait::async_trait;

use crate::domain::entities::OtpSessionState;

/// Trait for the external service that delivers and checks codes
#[async_trait]
pub trait OtpProvider: Send + Sync {
    /// Generate and deliver a code to the mobile number
    async fn send_otp(&self, mobile: &str, is_resend: bool) -> Result<(), String>;
    /// Check a code previously delivered to the mobile number
    ///
    /// A matching code stays pending until [`consume_otp`](Self::consume_otp)
    /// is called, so a caller whose own write fails can retry with it.
    async fn verify_otp(&self, mobile: &str, code: &str) -> Result<bool, String>;
    /// Invalidate the pending code once the verified change is committed
    async fn consume_otp(&self, mobile: &str) -> Result<(), String>;
}

/// Trait for session-scoped OTP state storage
#[async_trait]
pub trait OtpSessionStore: Send + Sync {
    /// Load the state of a session, empty if nothing was stored yet
    async fn load(&self, session_id: &str) -> Result<OtpSessionState, String>;
    /// Replace the state of a session
    async fn store(&self, session_id: &str, state: &OtpSessionState) -> Result<(), String>;
}
