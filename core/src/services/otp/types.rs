//! Types for OTP issuance results

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::OtpSessionState;

/// Result of a successful send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OtpIssued {
    /// Session state to persist for the caller's session
    pub session: OtpSessionState,
    /// When the provider accepted the send
    pub sent_at: DateTime<Utc>,
    /// Earliest instant another send will be accepted
    pub next_send_at: DateTime<Utc>,
}
