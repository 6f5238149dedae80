//! Session-scoped OTP state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OTP state scoped to one authenticated session
///
/// Passed into and returned from the issuance controller as a plain value;
/// the caller decides where it lives between requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpSessionState {
    /// When an OTP was last sent successfully in this session
    pub otp_last_sent_at: Option<DateTime<Utc>>,
}

impl OtpSessionState {
    /// Session that has never sent an OTP
    pub fn new() -> Self {
        Self::default()
    }

    /// State after a successful send at `at`
    pub fn sent_at(at: DateTime<Utc>) -> Self {
        Self {
            otp_last_sent_at: Some(at),
        }
    }

    /// Whole seconds since the last send, or `None` if nothing was sent
    ///
    /// A last-send instant in the future counts as zero elapsed seconds.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> Option<u64> {
        self.otp_last_sent_at
            .map(|last| (now - last).num_seconds().max(0) as u64)
    }

    /// Seconds left before another send is allowed under `cooldown_seconds`
    pub fn cooldown_remaining(&self, now: DateTime<Utc>, cooldown_seconds: u64) -> u64 {
        match self.elapsed_seconds(now) {
            Some(elapsed) => cooldown_seconds.saturating_sub(elapsed),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_fresh_session_has_no_cooldown() {
        let state = OtpSessionState::new();
        assert_eq!(state.elapsed_seconds(Utc::now()), None);
        assert_eq!(state.cooldown_remaining(Utc::now(), 60), 0);
    }

    #[test]
    fn test_cooldown_remaining_truncates_elapsed() {
        let now = Utc::now();
        let state = OtpSessionState::sent_at(now - Duration::milliseconds(30_500));

        assert_eq!(state.elapsed_seconds(now), Some(30));
        assert_eq!(state.cooldown_remaining(now, 60), 30);
    }

    #[test]
    fn test_cooldown_expires_at_window() {
        let now = Utc::now();
        let state = OtpSessionState::sent_at(now - Duration::seconds(60));
        assert_eq!(state.cooldown_remaining(now, 60), 0);

        let older = OtpSessionState::sent_at(now - Duration::seconds(600));
        assert_eq!(older.cooldown_remaining(now, 60), 0);
    }

    #[test]
    fn test_future_timestamp_counts_as_just_sent() {
        let now = Utc::now();
        let state = OtpSessionState::sent_at(now + Duration::seconds(15));

        assert_eq!(state.elapsed_seconds(now), Some(0));
        assert_eq!(state.cooldown_remaining(now, 60), 60);
    }

    #[test]
    fn test_state_serializes_as_json() {
        let state = OtpSessionState::sent_at(Utc::now());
        let json = serde_json::to_string(&state).unwrap();
        let restored: OtpSessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }
}
