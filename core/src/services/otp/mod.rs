//! OTP issuance for mobile number verification
//!
//! This module decides whether a new code may be sent in the current
//! session and delegates the actual delivery to an [`OtpProvider`]:
//! - Session-scoped cooldown between sends
//! - Provider call with the configured resend flag
//! - Session state returned as a value and persisted only on success

mod config;
mod mock;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::OtpIssuanceConfig;
pub use mock::{InMemoryOtpSessionStore, MockOtpProvider, SentOtp};
pub use service::OtpIssuanceService;
pub use traits::{OtpProvider, OtpSessionStore};
pub use types::OtpIssued;
