//! Typed profile form submission.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Editable attributes of the dependent profile record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields {
    #[serde(default)]
    pub bio: Option<String>,

    #[serde(default)]
    pub avatar_url: Option<String>,

    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

/// One save of the admin profile form
///
/// `mobile` is absent when the field was rendered read-only, which is the
/// case once the mobile number has been verified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSubmission {
    pub name: String,

    pub family: String,

    #[serde(default)]
    pub mobile: Option<String>,

    #[serde(default)]
    pub otp_code: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default)]
    pub password_confirmation: Option<String>,

    #[serde(default)]
    pub profile: Option<ProfileFields>,
}

impl ProfileSubmission {
    /// Submission with only the required names filled in
    pub fn new(name: impl Into<String>, family: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            family: family.into(),
            ..Self::default()
        }
    }

    pub fn with_mobile(mut self, mobile: impl Into<String>) -> Self {
        self.mobile = Some(mobile.into());
        self
    }

    pub fn with_otp_code(mut self, code: impl Into<String>) -> Self {
        self.otp_code = Some(code.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>, confirmation: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self.password_confirmation = Some(confirmation.into());
        self
    }

    pub fn with_profile(mut self, fields: ProfileFields) -> Self {
        self.profile = Some(fields);
        self
    }

    /// Trimmed mobile, `None` when absent or blank
    pub fn mobile(&self) -> Option<&str> {
        non_blank(self.mobile.as_deref())
    }

    /// Trimmed OTP code, `None` when absent or blank
    pub fn otp_code(&self) -> Option<&str> {
        non_blank(self.otp_code.as_deref())
    }

    /// New password, `None` when absent or empty
    ///
    /// Passwords are not trimmed; only an empty value means "keep the current one".
    pub fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
