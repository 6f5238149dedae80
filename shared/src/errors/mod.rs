//! Error codes shared by every API response

/// Common error codes used across the application
pub mod error_codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const OTP_COOLDOWN: &str = "OTP_COOLDOWN";
    pub const OTP_PROVIDER_ERROR: &str = "OTP_PROVIDER_ERROR";
    pub const OTP_REQUIRED: &str = "OTP_REQUIRED";
    pub const OTP_INVALID: &str = "OTP_INVALID";
    pub const MOBILE_ALREADY_VERIFIED: &str = "MOBILE_ALREADY_VERIFIED";
}
