//! Profile editing with OTP-gated mobile verification
//!
//! The save path validates the typed submission, requires a verified OTP
//! before an unverified user's mobile is accepted, and commits the user and
//! profile records in one write.

mod password;
mod service;
mod types;
pub mod validation;

#[cfg(test)]
mod tests;

pub use password::{BcryptPasswordHasher, PasswordHasher};
pub use service::ProfileService;
pub use types::SavedProfile;
