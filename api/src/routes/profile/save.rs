use actix_web::{web, HttpRequest, HttpResponse};
use pd_core::{DomainError, OtpProvider, ProfileForm, UserRepository};
use std::time::Instant;
use validator::Validate;

use super::{success_response, AppState};
use crate::dto::profile::{to_validation_errors, SaveProfileRequest, SaveProfileResponse};
use crate::handlers::error_standard::{extract_language, request_id};
use crate::handlers::to_standard_response;
use crate::i18n::get_error_message;
use crate::middleware::auth::AuthContext;

/// Handler for PUT /api/v1/profile
///
/// While the mobile is unverified the body must carry the code sent to it;
/// the mobile, its verification timestamp, the names, an optional new
/// password and the profile fields are then committed together.
pub async fn save_profile<U, P>(
    req: HttpRequest,
    state: web::Data<AppState<U, P>>,
    auth: AuthContext,
    body: web::Json<SaveProfileRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: OtpProvider + 'static,
{
    let started = Instant::now();
    let request_id = request_id(&req);
    let body = body.into_inner();

    if let Err(errors) = body.validate() {
        let error = DomainError::Validation(to_validation_errors(&errors));
        return to_standard_response(&error, &req);
    }

    let submission = body.into_submission();
    let saved = match state.profile_service.save_profile(auth.user_id, &submission).await {
        Ok(saved) => saved,
        Err(error) => return to_standard_response(&error, &req),
    };

    log::info!(
        "[{}] Profile saved for user {} (mobile verified now: {})",
        request_id,
        auth.user_id,
        saved.mobile_just_verified
    );

    let message = get_error_message("general", "profile_saved", extract_language(&req))
        .map(|(_, text, _)| text)
        .unwrap_or_else(|| "Profile updated successfully.".to_string());

    success_response(
        &req,
        SaveProfileResponse {
            message,
            mobile_just_verified: saved.mobile_just_verified,
            profile: ProfileForm::from_parts(&saved.user, Some(&saved.profile)),
        },
        started,
    )
}
