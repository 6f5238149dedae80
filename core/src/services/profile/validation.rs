//! Boundary validation for profile submissions
//!
//! Every rule runs and failures are collected per field, so the caller can
//! show them all at once.

use pd_shared::mobile::is_valid_local_mobile;
use pd_shared::validation::validators::{is_numeric, not_blank};
use uuid::Uuid;

use crate::domain::entities::User;
use crate::domain::value_objects::ProfileSubmission;
use crate::errors::{field_codes, DomainResult, ValidationErrors};
use crate::repositories::UserRepository;

/// Rules that need no store access
pub fn check_fields(user: &User, submission: &ProfileSubmission) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if !not_blank(&submission.name) {
        errors.add_error("name", "Name is required", field_codes::REQUIRED);
    }
    if !not_blank(&submission.family) {
        errors.add_error("family", "Family is required", field_codes::REQUIRED);
    }

    if user.is_mobile_verified() {
        if let Some(mobile) = submission.mobile() {
            if mobile != user.mobile {
                errors.add_error("mobile", "Verified mobile cannot be changed", field_codes::LOCKED);
            }
        }
    } else {
        check_mobile_format(submission.mobile(), &mut errors);
    }

    if let Some(code) = submission.otp_code() {
        if !is_numeric(code) {
            errors.add_error("otp_code", "Code must contain digits only", field_codes::NUMERIC);
        }
    }

    if let Some(password) = submission.new_password() {
        if submission.password_confirmation.as_deref() != Some(password) {
            errors.add_error("password", "Password confirmation does not match", field_codes::CONFIRMED);
        }
    }

    errors
}

/// Full validation of a save, including mobile uniqueness
pub async fn validate_submission<U>(
    users: &U,
    user: &User,
    submission: &ProfileSubmission,
) -> DomainResult<ValidationErrors>
where
    U: UserRepository + ?Sized,
{
    let mut errors = check_fields(user, submission);

    if !user.is_mobile_verified() && !errors.has_field("mobile") {
        if let Some(mobile) = submission.mobile() {
            check_mobile_unique(users, mobile, user.id, &mut errors).await?;
        }
    }

    Ok(errors)
}

/// Validation of the mobile number a code is about to be sent to
pub async fn validate_mobile<U>(
    users: &U,
    user_id: Uuid,
    mobile: Option<&str>,
) -> DomainResult<ValidationErrors>
where
    U: UserRepository + ?Sized,
{
    let mut errors = ValidationErrors::new();
    let mobile = mobile.map(str::trim).filter(|m| !m.is_empty());

    check_mobile_format(mobile, &mut errors);
    if let (true, Some(mobile)) = (errors.is_empty(), mobile) {
        check_mobile_unique(users, mobile, user_id, &mut errors).await?;
    }

    Ok(errors)
}

fn check_mobile_format(mobile: Option<&str>, errors: &mut ValidationErrors) {
    match mobile {
        None => errors.add_error("mobile", "Mobile is required", field_codes::REQUIRED),
        Some(mobile) if !is_valid_local_mobile(mobile) => {
            errors.add_error("mobile", "Mobile format is invalid", field_codes::REGEX)
        }
        Some(_) => {}
    }
}

async fn check_mobile_unique<U>(
    users: &U,
    mobile: &str,
    user_id: Uuid,
    errors: &mut ValidationErrors,
) -> DomainResult<()>
where
    U: UserRepository + ?Sized,
{
    if users.mobile_taken(mobile, Some(user_id)).await? {
        errors.add_error("mobile", "Mobile is already taken", field_codes::UNIQUE);
    }
    Ok(())
}
