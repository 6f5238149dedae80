use actix_web::{web, HttpRequest, HttpResponse};
use pd_core::{OtpProvider, UserRepository};
use std::time::Instant;

use super::{success_response, AppState};
use crate::handlers::to_standard_response;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/profile
///
/// Returns the user merged with their profile, plus the flags that decide
/// whether the mobile input, the OTP input and the send action are offered.
pub async fn show_profile<U, P>(
    req: HttpRequest,
    state: web::Data<AppState<U, P>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: OtpProvider + 'static,
{
    let started = Instant::now();

    match state.profile_service.form_state(auth.user_id).await {
        Ok(form) => success_response(&req, form, started),
        Err(error) => to_standard_response(&error, &req),
    }
}
