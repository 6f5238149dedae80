//! Types for profile service results

use serde::Serialize;

use crate::domain::entities::{Profile, User};

/// Result of a committed save
#[derive(Debug, Clone, Serialize)]
pub struct SavedProfile {
    /// User record as committed
    pub user: User,
    /// Profile record as committed
    pub profile: Profile,
    /// Whether this save moved the mobile from unverified to verified
    pub mobile_just_verified: bool,
}
