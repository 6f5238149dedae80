//! OTP workflow errors and field-level validation codes
//!
//! Messages here are for logs only. User-facing text is resolved from the
//! error code by the presentation layer.

use pd_shared::error_codes;
use thiserror::Error;

/// Errors raised by the OTP issuance and verification gate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("OTP cooldown active: {seconds_left} seconds left")]
    CooldownActive { seconds_left: u64 },

    #[error("OTP provider failure: {message}")]
    ProviderFailure { message: String },

    #[error("OTP code required")]
    CodeRequired,

    #[error("OTP code invalid")]
    CodeInvalid,

    #[error("Mobile already verified")]
    MobileAlreadyVerified,
}

impl OtpError {
    pub fn code(&self) -> &'static str {
        match self {
            OtpError::CooldownActive { .. } => error_codes::OTP_COOLDOWN,
            OtpError::ProviderFailure { .. } => error_codes::OTP_PROVIDER_ERROR,
            OtpError::CodeRequired => error_codes::OTP_REQUIRED,
            OtpError::CodeInvalid => error_codes::OTP_INVALID,
            OtpError::MobileAlreadyVerified => error_codes::MOBILE_ALREADY_VERIFIED,
        }
    }

    /// Seconds the caller should wait before retrying, if any
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            OtpError::CooldownActive { seconds_left } => Some(*seconds_left),
            _ => None,
        }
    }
}

/// Codes attached to field-level validation errors
pub mod field_codes {
    pub const REQUIRED: &str = "required";
    pub const REGEX: &str = "regex";
    pub const UNIQUE: &str = "unique";
    pub const NUMERIC: &str = "numeric";
    pub const CONFIRMED: &str = "confirmed";
    pub const LOCKED: &str = "locked";
}
