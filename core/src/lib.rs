//! # ProfileDesk Core
//!
//! Core business logic for the ProfileDesk backend: the user and profile
//! entities, the OTP issuance controller with its session-scoped cooldown,
//! and the profile save controller that gates mobile changes behind OTP
//! verification. Storage, session state, OTP delivery and password hashing
//! are reached through traits so the services stay independently testable.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{OtpSessionState, Profile, User};
pub use domain::value_objects::{ProfileFields, ProfileForm, ProfileSubmission};
pub use errors::{field_codes, DomainError, DomainResult, OtpError, ValidationError, ValidationErrors};
pub use repositories::{MockUserRepository, UserRepository};
pub use services::{
    BcryptPasswordHasher, InMemoryOtpSessionStore, MockOtpProvider, OtpIssuanceConfig,
    OtpIssuanceService, OtpIssued, OtpProvider, OtpSessionStore, PasswordHasher, ProfileService,
    SavedProfile, SentOtp,
};
