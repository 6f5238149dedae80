use chrono::{DateTime, NaiveDate, Utc};
use pd_core::{ProfileFields, ProfileForm, ProfileSubmission, ValidationErrors};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/v1/profile/otp`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SendOtpRequest {
    /// Mobile the code goes to, as currently typed in the form
    #[serde(default)]
    #[validate(length(max = 20))]
    pub mobile: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpResponse {
    pub message: String,
    pub sent_at: DateTime<Utc>,
    pub next_send_at: DateTime<Utc>,
    /// Seconds until another code may be requested
    pub resend_after: u64,
}

/// Body of `PUT /api/v1/profile`
///
/// Mirrors the flat edit form. Length and URL limits are checked here;
/// the profile rules themselves belong to the domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SaveProfileRequest {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 255))]
    pub family: String,

    #[serde(default)]
    #[validate(length(max = 20))]
    pub mobile: Option<String>,

    #[serde(default)]
    #[validate(length(max = 10))]
    pub otp_code: Option<String>,

    #[serde(default)]
    #[validate(length(max = 72))]
    pub password: Option<String>,

    #[serde(default)]
    pub password_confirmation: Option<String>,

    #[serde(default)]
    #[validate(length(max = 2000))]
    pub bio: Option<String>,

    #[serde(default)]
    #[validate(url, length(max = 2048))]
    pub avatar_url: Option<String>,

    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

impl SaveProfileRequest {
    pub fn into_submission(self) -> ProfileSubmission {
        ProfileSubmission {
            name: self.name,
            family: self.family,
            mobile: self.mobile,
            otp_code: self.otp_code,
            password: self.password,
            password_confirmation: self.password_confirmation,
            profile: Some(ProfileFields {
                bio: self.bio,
                avatar_url: self.avatar_url,
                birth_date: self.birth_date,
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveProfileResponse {
    pub message: String,
    pub mobile_just_verified: bool,
    pub profile: ProfileForm,
}

/// Convert boundary validation failures into domain field errors
pub fn to_validation_errors(errors: &validator::ValidationErrors) -> ValidationErrors {
    let mut converted = ValidationErrors::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors.iter() {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field));
            converted.add_error(field.to_string(), message, error.code.to_string());
        }
    }

    converted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_request_builds_submission_with_profile() {
        let request: SaveProfileRequest = serde_json::from_value(serde_json::json!({
            "name": "Ali",
            "family": "Rezai",
            "mobile": "09123456789",
            "otp_code": "4455",
            "bio": "Site admin",
            "birth_date": "1990-03-21"
        }))
        .unwrap();

        let submission = request.into_submission();
        assert_eq!(submission.mobile(), Some("09123456789"));
        assert_eq!(submission.otp_code(), Some("4455"));

        let profile = submission.profile.unwrap();
        assert_eq!(profile.bio.as_deref(), Some("Site admin"));
        assert_eq!(profile.birth_date, NaiveDate::from_ymd_opt(1990, 3, 21));
    }

    #[test]
    fn test_boundary_limits() {
        let request = SaveProfileRequest {
            name: "a".repeat(256),
            avatar_url: Some("not a url".to_string()),
            ..Default::default()
        };

        let errors = to_validation_errors(&request.validate().unwrap_err());
        assert!(errors.has("name", "length"));
        assert!(errors.has("avatar_url", "url"));
    }

    #[test]
    fn test_send_otp_request_accepts_missing_mobile() {
        let request: SendOtpRequest = serde_json::from_str("{}").unwrap();
        assert!(request.mobile.is_none());
        assert!(request.validate().is_ok());
    }
}
