//! Business services containing domain logic and use cases.

pub mod otp;
pub mod profile;

// Re-export commonly used types
pub use otp::{
    InMemoryOtpSessionStore, MockOtpProvider, OtpIssuanceConfig, OtpIssuanceService, OtpIssued,
    OtpProvider, OtpSessionStore, SentOtp,
};
pub use profile::{BcryptPasswordHasher, PasswordHasher, ProfileService, SavedProfile};
