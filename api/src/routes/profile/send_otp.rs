use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use pd_core::{DomainError, OtpProvider, UserRepository};
use pd_shared::mobile::mask_mobile;
use std::collections::HashMap;
use std::time::Instant;
use validator::Validate;

use super::{success_response, AppState};
use crate::dto::profile::{to_validation_errors, SendOtpRequest, SendOtpResponse};
use crate::handlers::error_standard::{extract_language, request_id};
use crate::handlers::to_standard_response;
use crate::i18n::{format_message, get_error_message};
use crate::middleware::auth::AuthContext;

/// Handler for POST /api/v1/profile/otp
///
/// Validates the typed mobile the same way a save would, then sends a code
/// unless the session is still inside its cooldown window.
///
/// # Request Body
///
/// ```json
/// { "mobile": "09123456789" }
/// ```
///
/// # Responses
///
/// - 200 with `resend_after` once the provider accepted the send
/// - 409 when the mobile is already verified
/// - 422 when the mobile is missing, malformed or taken
/// - 429 with `Retry-After` while the cooldown is active
/// - 502 when the provider fails
pub async fn send_otp<U, P>(
    req: HttpRequest,
    state: web::Data<AppState<U, P>>,
    auth: AuthContext,
    body: web::Json<SendOtpRequest>,
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

    let mobile = match state
        .profile_service
        .otp_target_mobile(auth.user_id, body.mobile.as_deref())
        .await
    {
        Ok(mobile) => mobile,
        Err(error) => return to_standard_response(&error, &req),
    };

    log::info!(
        "[{}] Sending verification code to {} for user {}",
        request_id,
        mask_mobile(&mobile),
        auth.user_id
    );

    let issued = match state
        .otp_service
        .request_otp_in_session(state.sessions.as_ref(), &auth.session_id, &mobile)
        .await
    {
        Ok(issued) => issued,
        Err(error) => return to_standard_response(&error, &req),
    };

    let lang = extract_language(&req);
    let mut params = HashMap::new();
    params.insert("mobile", mobile.clone());
    let message = get_error_message("otp", "sent", lang)
        .map(|(_, template, _)| format_message(&template, &params))
        .unwrap_or_else(|| format!("A verification code was sent to {}.", mobile));

    let resend_after = (issued.next_send_at - Utc::now()).num_seconds().max(0) as u64;

    success_response(
        &req,
        SendOtpResponse {
            message,
            sent_at: issued.sent_at,
            next_send_at: issued.next_send_at,
            resend_after,
        },
        started,
    )
}
