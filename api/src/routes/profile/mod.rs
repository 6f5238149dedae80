//! Admin profile route handlers
//!
//! - `GET /api/v1/profile` renders the edit form state
//! - `POST /api/v1/profile/otp` sends a verification code
//! - `PUT /api/v1/profile` saves the form

pub mod save;
pub mod send_otp;
pub mod show;

pub use save::save_profile;
pub use send_otp::send_otp;
pub use show::show_profile;

use actix_web::{HttpRequest, HttpResponse};
use pd_core::{
    OtpIssuanceConfig, OtpIssuanceService, OtpProvider, OtpSessionStore, PasswordHasher, ProfileService,
    UserRepository,
};
use pd_shared::types::response::{DetailedResponse, ResponseMeta};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use crate::handlers::error_standard::request_id;

/// Application state that holds shared services
pub struct AppState<U, P>
where
    U: UserRepository,
    P: OtpProvider,
{
    pub profile_service: Arc<ProfileService<U, P>>,
    pub otp_service: Arc<OtpIssuanceService<P>>,
    pub sessions: Arc<dyn OtpSessionStore>,
}

impl<U, P> AppState<U, P>
where
    U: UserRepository,
    P: OtpProvider,
{
    /// Wires both controllers around one provider
    pub fn new(
        users: Arc<U>,
        provider: Arc<P>,
        sessions: Arc<dyn OtpSessionStore>,
        hasher: Arc<dyn PasswordHasher>,
        otp_config: OtpIssuanceConfig,
    ) -> Self {
        Self {
            profile_service: Arc::new(ProfileService::new(users, Arc::clone(&provider), hasher)),
            otp_service: Arc::new(OtpIssuanceService::new(provider, otp_config)),
            sessions,
        }
    }
}

/// 200 response in the standard envelope
fn success_response<T: Serialize>(req: &HttpRequest, data: T, started: Instant) -> HttpResponse {
    let mut meta = ResponseMeta::for_request(request_id(req));
    meta.response_time_ms = Some(started.elapsed().as_millis() as u64);

    HttpResponse::Ok().json(DetailedResponse::success(data, meta))
}
