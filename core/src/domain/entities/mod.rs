//! Domain entities representing core business objects.

pub mod otp_session;
pub mod user;

// Re-export commonly used types
pub use otp_session::OtpSessionState;
pub use user::{Profile, User};
