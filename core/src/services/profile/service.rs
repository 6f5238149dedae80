//! Profile service implementation

use chrono::{DateTime, Utc};
use pd_shared::mobile::mask_mobile;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Profile, User};
use crate::domain::value_objects::{ProfileForm, ProfileSubmission};
use crate::errors::{DomainError, DomainResult, OtpError};
use crate::repositories::UserRepository;
use crate::services::otp::OtpProvider;

use super::password::PasswordHasher;
use super::types::SavedProfile;
use super::validation;

/// Profile service backing the admin profile form
pub struct ProfileService<U: UserRepository, P: OtpProvider> {
    /// User and profile store
    users: Arc<U>,
    /// Provider checking submitted codes
    provider: Arc<P>,
    /// Hasher for new passwords
    hasher: Arc<dyn PasswordHasher>,
}

impl<U: UserRepository, P: OtpProvider> ProfileService<U, P> {
    /// Create a new profile service
    pub fn new(users: Arc<U>, provider: Arc<P>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            users,
            provider,
            hasher,
        }
    }

    async fn load_user(&self, user_id: Uuid) -> DomainResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }

    /// Current form contents and which inputs are enabled
    pub async fn form_state(&self, user_id: Uuid) -> DomainResult<ProfileForm> {
        let user = self.load_user(user_id).await?;
        let profile = self.users.find_profile(user_id).await?;
        Ok(ProfileForm::from_parts(&user, profile.as_ref()))
    }

    /// Validate the mobile a code should be sent to
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Trimmed mobile, valid and not held by another user
    /// * `Err(OtpError::MobileAlreadyVerified)` - Nothing left to verify
    /// * `Err(DomainError::Validation)` - Mobile missing, malformed or taken
    pub async fn otp_target_mobile(&self, user_id: Uuid, mobile: Option<&str>) -> DomainResult<String> {
        let user = self.load_user(user_id).await?;
        if user.is_mobile_verified() {
            return Err(OtpError::MobileAlreadyVerified.into());
        }

        validation::validate_mobile(self.users.as_ref(), user_id, mobile)
            .await?
            .into_result()?;

        Ok(mobile.map(str::trim).unwrap_or_default().to_string())
    }

    /// Validate and commit one profile form submission
    pub async fn save_profile(&self, user_id: Uuid, submission: &ProfileSubmission) -> DomainResult<SavedProfile> {
        self.save_profile_at(user_id, submission, Utc::now()).await
    }

    /// Same as [`save_profile`](Self::save_profile) with an explicit clock
    ///
    /// The user record is untouched on every error path, and a matching code
    /// is only spent once the commit has gone through.
    pub async fn save_profile_at(
        &self,
        user_id: Uuid,
        submission: &ProfileSubmission,
        now: DateTime<Utc>,
    ) -> DomainResult<SavedProfile> {
        let user = self.load_user(user_id).await?;

        let errors = validation::validate_submission(self.users.as_ref(), &user, submission).await?;
        if !errors.is_empty() {
            tracing::info!(
                user_id = %user_id,
                errors = %errors,
                event = "profile_validation_failed",
                "Profile submission rejected"
            );
            return Err(errors.into());
        }

        // Hash before the code check so a hashing failure leaves the code untouched
        let password_hash = submission
            .new_password()
            .map(|password| self.hasher.hash(password))
            .transpose()?;

        let mut updated = user.clone();
        let mobile_just_verified = !user.is_mobile_verified();

        if mobile_just_verified {
            let mobile = submission
                .mobile()
                .ok_or_else(|| DomainError::internal("Validated submission lost its mobile"))?;
            self.verify_code(mobile, submission.otp_code()).await?;
            updated.verify_mobile(mobile, now);
        }

        updated.rename(submission.name.trim(), submission.family.trim());

        if let Some(hash) = password_hash {
            updated.set_password_hash(hash);
        }

        let mut profile = self
            .users
            .find_profile(user_id)
            .await?
            .unwrap_or_else(|| Profile::new(user_id));
        if let Some(fields) = &submission.profile {
            profile.apply(fields);
        }

        // A failed commit leaves the verified code pending for another attempt
        self.users.save_with_profile(&updated, &profile).await.map_err(|e| {
            tracing::warn!(
                user_id = %user_id,
                error = %e,
                event = "profile_commit_failed",
                "Profile commit rejected by store"
            );
            e
        })?;

        if mobile_just_verified {
            self.consume_code(&updated.mobile).await;
        }

        tracing::info!(
            user_id = %user_id,
            mobile = %mask_mobile(&updated.mobile),
            mobile_just_verified = mobile_just_verified,
            event = "profile_saved",
            "Profile saved"
        );

        Ok(SavedProfile {
            user: updated,
            profile,
            mobile_just_verified,
        })
    }

    async fn verify_code(&self, mobile: &str, code: Option<&str>) -> DomainResult<()> {
        let code = code.ok_or(OtpError::CodeRequired)?;

        let valid = self.provider.verify_otp(mobile, code).await.map_err(|e| {
            tracing::error!(
                mobile = %mask_mobile(mobile),
                error = %e,
                event = "otp_verify_failed",
                "OTP provider failed to verify code"
            );
            OtpError::ProviderFailure { message: e }
        })?;

        if !valid {
            tracing::warn!(
                mobile = %mask_mobile(mobile),
                event = "otp_code_invalid",
                "Submitted OTP code rejected"
            );
            return Err(OtpError::CodeInvalid.into());
        }

        Ok(())
    }

    /// Spend the code behind a committed verification, logging failures only
    async fn consume_code(&self, mobile: &str) {
        if let Err(e) = self.provider.consume_otp(mobile).await {
            tracing::warn!(
                mobile = %mask_mobile(mobile),
                error = %e,
                event = "otp_consume_failed",
                "Failed to invalidate verified OTP code"
            );
        }
    }
}
