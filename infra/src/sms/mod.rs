//! SMS Service Module
//!
//! Delivery of OTP codes by text message. The production gateway lives
//! outside this service; [`LogSmsSender`] stands in for it during
//! development and logs a masked delivery instead of sending anything.

use async_trait::async_trait;

use crate::InfrastructureError;

pub mod log_sms;


pub use log_sms::LogSmsSender;

/// SMS service trait for sending text messages
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Send a message to a mobile number, returning the provider message id
    async fn send_sms(&self, mobile: &str, message: &str) -> Result<String, InfrastructureError>;

    /// Send an OTP code using the standard message format
    async fn send_otp_code(&self, mobile: &str, code: &str, ttl_seconds: u64) -> Result<String, InfrastructureError> {
        let message = format!(
            "Your ProfileDesk verification code is: {}. It expires in {} minutes.",
            code,
            ttl_seconds.div_ceil(60).max(1)
        );
        self.send_sms(mobile, &message).await
    }

    /// Name of the delivery provider, for logs
    fn provider_name(&self) -> &str;
}
