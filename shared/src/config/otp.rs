//! OTP issuance, verification and password hashing settings

use serde::{Deserialize, Serialize};

use super::env_or;

/// OTP configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Minimum seconds between two sends in the same session
    #[serde(default = "default_cooldown_seconds")]
    pub cooldown_seconds: u64,

    /// Value of the resend flag handed to the provider on every send
    #[serde(default = "default_resend_flag")]
    pub resend_flag: bool,

    /// Number of digits in a generated code
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Lifetime of a generated code in seconds
    #[serde(default = "default_code_ttl_seconds")]
    pub code_ttl_seconds: u64,

    /// Wrong guesses after which a pending code is dropped
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// bcrypt cost used when a new password is saved
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            cooldown_seconds: default_cooldown_seconds(),
            resend_flag: default_resend_flag(),
            code_length: default_code_length(),
            code_ttl_seconds: default_code_ttl_seconds(),
            max_attempts: default_max_attempts(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            cooldown_seconds: env_or("OTP_COOLDOWN_SECONDS", default_cooldown_seconds()),
            resend_flag: env_or("OTP_RESEND_FLAG", default_resend_flag()),
            code_length: env_or("OTP_CODE_LENGTH", default_code_length()),
            code_ttl_seconds: env_or("OTP_CODE_TTL_SECONDS", default_code_ttl_seconds()),
            max_attempts: env_or("OTP_MAX_ATTEMPTS", default_max_attempts()).max(1),
            bcrypt_cost: env_or("PASSWORD_BCRYPT_COST", default_bcrypt_cost()),
        }
    }
}

fn default_cooldown_seconds() -> u64 {
    60
}

fn default_resend_flag() -> bool {
    true
}

fn default_code_length() -> usize {
    6
}

fn default_code_ttl_seconds() -> u64 {
    120
}

fn default_max_attempts() -> u32 {
    3
}

fn default_bcrypt_cost() -> u32 {
    12
}
