//! Configuration for the OTP issuance service

use pd_shared::OtpConfig;

/// Default seconds between two sends in one session
pub const DEFAULT_COOLDOWN_SECONDS: u64 = 60;

/// Configuration for the OTP issuance service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtpIssuanceConfig {
    /// Minimum seconds between two successful sends in the same session
    pub cooldown_seconds: u64,
    /// Value passed as `is_resend` on every provider call
    pub resend_flag: bool,
}

impl Default for OtpIssuanceConfig {
    fn default() -> Self {
        Self {
            cooldown_seconds: DEFAULT_COOLDOWN_SECONDS,
            resend_flag: true,
        }
    }
}

impl From<&OtpConfig> for OtpIssuanceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            cooldown_seconds: config.cooldown_seconds,
            resend_flag: config.resend_flag,
        }
    }
}
