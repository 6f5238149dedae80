//! Read model backing the profile edit form.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{Profile, User};

/// User attributes merged with profile attributes plus presentation flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileForm {
    pub user_id: Uuid,
    pub name: String,
    pub family: String,
    pub mobile: String,
    pub mobile_verified_at: Option<DateTime<Utc>>,

    /// Whether the mobile input accepts changes
    pub mobile_editable: bool,

    /// Whether the OTP code input is shown
    pub otp_code_visible: bool,

    /// Whether the send-OTP action is offered
    pub send_otp_available: bool,

    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

impl ProfileForm {
    /// Builds the form for a user; a missing profile renders as empty fields
    pub fn from_parts(user: &User, profile: Option<&Profile>) -> Self {
        let unverified = !user.is_mobile_verified();
        Self {
            user_id: user.id,
            name: user.name.clone(),
            family: user.family.clone(),
            mobile: user.mobile.clone(),
            mobile_verified_at: user.mobile_verified_at,
            mobile_editable: unverified,
            otp_code_visible: unverified,
            send_otp_available: unverified,
            bio: profile.and_then(|p| p.bio.clone()),
            avatar_url: profile.and_then(|p| p.avatar_url.clone()),
            birth_date: profile.and_then(|p| p.birth_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unverified_user_form_is_editable() {
        let user = User::new("Ali", "Rezai", "09120000000", "hash");
        let form = ProfileForm::from_parts(&user, None);

        assert!(form.mobile_editable);
        assert!(form.otp_code_visible);
        assert!(form.send_otp_available);
        assert_eq!(form.bio, None);
    }

    #[test]
    fn test_verified_user_form_locks_mobile() {
        let mut user = User::new("Ali", "Rezai", "09120000000", "hash");
        user.verify_mobile("09123456789", Utc::now());
        let mut profile = Profile::new(user.id);
        profile.bio = Some("Site admin".to_string());

        let form = ProfileForm::from_parts(&user, Some(&profile));

        assert!(!form.mobile_editable);
        assert!(!form.otp_code_visible);
        assert!(!form.send_otp_available);
        assert_eq!(form.mobile, "09123456789");
        assert_eq!(form.bio.as_deref(), Some("Site admin"));
    }
}
