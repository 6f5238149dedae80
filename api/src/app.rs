//! Application factory
//!
//! Builds the actix-web application around an [`AppState`]. The binary
//! wires MySQL, Redis and the SMS transport into it; tests wire in-memory
//! doubles.

use actix_web::{middleware::Logger, web, App, HttpRequest, HttpResponse};

use crate::config::HttpSettings;
use crate::handlers::error_standard::{build_error_response, MappedError, RequestContext};
use crate::handlers::json_error_handler;
use crate::i18n::get_error_message;
use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::profile::{save_profile, send_otp, show_profile, AppState};

use pd_core::{OtpProvider, UserRepository};

/// Create and configure the application with all dependencies
pub fn create_app<U, P>(
    app_state: web::Data<AppState<U, P>>,
    settings: &HttpSettings,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    P: OtpProvider + 'static,
{
    let json_config = web::JsonConfig::default()
        .limit(settings.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        .wrap(create_cors(&settings.cors))
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/profile")
                        .wrap(JwtAuth::new(settings.jwt.clone()))
                        .route("", web::get().to(show_profile::<U, P>))
                        .route("", web::put().to(save_profile::<U, P>))
                        .route("/otp", web::post().to(send_otp::<U, P>)),
                )
                .route("/", web::get().to(api_documentation)),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "profiledesk-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// API documentation endpoint
async fn api_documentation() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "ProfileDesk API v1",
        "endpoints": {
            "health": "/health",
            "profile": {
                "show": {
                    "path": "/api/v1/profile",
                    "method": "GET",
                    "requires_auth": true,
                    "description": "Profile form state and mobile verification flags"
                },
                "send_otp": {
                    "path": "/api/v1/profile/otp",
                    "method": "POST",
                    "requires_auth": true,
                    "description": "Send a verification code to the typed mobile",
                    "request_body": { "mobile": "string (09xxxxxxxxx)" },
                    "responses": {
                        "200": "Code sent",
                        "409": "Mobile already verified",
                        "422": "Mobile missing, malformed or taken",
                        "429": "Cooldown active, see Retry-After",
                        "502": "OTP provider failure"
                    }
                },
                "save": {
                    "path": "/api/v1/profile",
                    "method": "PUT",
                    "requires_auth": true,
                    "description": "Save names, password, profile fields and, while unverified, the mobile",
                    "request_body": {
                        "name": "string",
                        "family": "string",
                        "mobile": "string (ignored once verified)",
                        "otp_code": "string of digits (required while unverified)",
                        "password": "string (optional)",
                        "password_confirmation": "string",
                        "bio": "string",
                        "avatar_url": "string (URL)",
                        "birth_date": "string (YYYY-MM-DD)"
                    },
                    "responses": {
                        "200": "Profile saved",
                        "422": "Validation failed, or code missing or incorrect",
                        "502": "OTP provider failure"
                    }
                }
            }
        }
    }))
}

/// Default 404 handler
async fn not_found(req: HttpRequest) -> HttpResponse {
    let ctx = RequestContext::from_request(&req);
    let (code, message, status) = get_error_message("general", "not_found", ctx.language)
        .map(|(code, template, status)| (code, template.replace("{resource}", "resource"), status))
        .unwrap_or_else(|| ("NOT_FOUND".to_string(), "The requested resource was not found".to_string(), 404));

    build_error_response(
        MappedError {
            code,
            message,
            status,
            fields: None,
            context: Default::default(),
            retry_after: None,
        },
        &ctx,
    )
}
