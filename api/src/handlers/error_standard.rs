//! Domain error to HTTP response mapping
//!
//! Every error leaves the API in the `DetailedResponse` envelope with a
//! localized message. Status codes come from the message catalogue.

use actix_web::http::{header, StatusCode};
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use pd_core::errors::{DomainError, OtpError, ValidationErrors};
use pd_shared::types::response::{DetailedResponse, ErrorDetail, ResponseMeta};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

use crate::i18n::{attribute_name, format_message, get_error_message, Language};

/// Header carrying the caller's correlation id
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Fully resolved error, ready to be rendered
#[derive(Debug, Clone)]
pub struct MappedError {
    pub code: String,
    pub message: String,
    pub status: u16,
    pub fields: Option<HashMap<String, Vec<String>>>,
    pub context: HashMap<String, serde_json::Value>,
    pub retry_after: Option<u64>,
}

impl MappedError {
    fn from_catalogue(category: &str, key: &str, lang: Language, params: HashMap<&str, String>) -> Self {
        let (code, template, status) = get_error_message(category, key, lang).unwrap_or_else(|| {
            (
                "INTERNAL_ERROR".to_string(),
                "An error occurred".to_string(),
                500,
            )
        });

        Self {
            code,
            message: format_message(&template, &params),
            status,
            fields: None,
            context: HashMap::new(),
            retry_after: None,
        }
    }

    fn with_field(mut self, field: &str) -> Self {
        let mut fields = HashMap::new();
        fields.insert(field.to_string(), vec![self.message.clone()]);
        self.fields = Some(fields);
        self
    }
}

/// Extract language preference from request
pub fn extract_language(req: &HttpRequest) -> Language {
    req.headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .map(Language::from_accept_language)
        .unwrap_or_default()
}

/// Caller-supplied request id, or a fresh one
pub fn request_id(req: &HttpRequest) -> String {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Localize field-level validation messages, grouped by field
pub fn localize_validation(errors: &ValidationErrors, lang: Language) -> HashMap<String, Vec<String>> {
    let mut fields: HashMap<String, Vec<String>> = HashMap::new();

    for error in errors.errors() {
        let message = match get_error_message("validation", &error.code, lang) {
            Some((_, template, _)) => {
                let mut params = HashMap::new();
                params.insert("field", attribute_name(&error.field, lang));
                format_message(&template, &params)
            }
            None => error.message.clone(),
        };
        fields.entry(error.field.clone()).or_default().push(message);
    }

    fields
}

/// Resolve a domain error into code, localized message and status
pub fn map_domain_error(error: &DomainError, lang: Language) -> MappedError {
    match error {
        DomainError::Validation(errors) => {
            let mut mapped = MappedError::from_catalogue("general", "validation_error", lang, HashMap::new());
            mapped.fields = Some(localize_validation(errors, lang));
            mapped
        }
        DomainError::NotFound { resource } => {
            let mut params = HashMap::new();
            params.insert("resource", resource.clone());
            MappedError::from_catalogue("general", "not_found", lang, params)
        }
        DomainError::Unauthorized => {
            MappedError::from_catalogue("general", "unauthorized", lang, HashMap::new())
        }
        DomainError::Internal { .. } => {
            MappedError::from_catalogue("general", "internal_error", lang, HashMap::new())
        }
        DomainError::Otp(otp_error) => map_otp_error(otp_error, lang),
    }
}

fn map_otp_error(error: &OtpError, lang: Language) -> MappedError {
    match error {
        OtpError::CooldownActive { seconds_left } => {
            let mut params = HashMap::new();
            params.insert("seconds", seconds_left.to_string());
            let mut mapped = MappedError::from_catalogue("otp", "cooldown_active", lang, params);
            mapped
                .context
                .insert("seconds_left".to_string(), serde_json::json!(seconds_left));
            mapped.retry_after = Some(*seconds_left);
            mapped
        }
        OtpError::ProviderFailure { .. } => {
            MappedError::from_catalogue("otp", "provider_failure", lang, HashMap::new())
        }
        OtpError::CodeRequired => {
            MappedError::from_catalogue("otp", "code_required", lang, HashMap::new()).with_field("otp_code")
        }
        OtpError::CodeInvalid => {
            MappedError::from_catalogue("otp", "code_invalid", lang, HashMap::new()).with_field("otp_code")
        }
        OtpError::MobileAlreadyVerified => {
            MappedError::from_catalogue("otp", "already_verified", lang, HashMap::new())
        }
    }
}

/// Convert domain error to standardized HTTP response
pub fn to_standard_response(error: &DomainError, req: &HttpRequest) -> HttpResponse {
    let context = RequestContext::from_request(req);
    render(error, &context)
}

fn render(error: &DomainError, ctx: &RequestContext) -> HttpResponse {
    match error {
        DomainError::Internal { message } => {
            log::error!("[{}] {} {} - internal error: {}", ctx.trace_id, ctx.method, ctx.path, message)
        }
        DomainError::Otp(OtpError::ProviderFailure { message }) => {
            log::error!("[{}] {} {} - OTP provider failure: {}", ctx.trace_id, ctx.method, ctx.path, message)
        }
        other => log::warn!("[{}] {} {} - {}", ctx.trace_id, ctx.method, ctx.path, other),
    }

    let mapped = map_domain_error(error, ctx.language);
    build_error_response(mapped, ctx)
}

/// Render a mapped error inside the response envelope
pub fn build_error_response(mapped: MappedError, ctx: &RequestContext) -> HttpResponse {
    let mut detail = ErrorDetail::new(mapped.code, mapped.message)
        .with_context("path", serde_json::json!(ctx.path))
        .with_context("method", serde_json::json!(ctx.method));
    for (key, value) in mapped.context {
        detail = detail.with_context(key, value);
    }
    if let Some(fields) = mapped.fields {
        detail = detail.with_fields(fields);
    }

    let response = DetailedResponse::<()>::failure(detail, ResponseMeta::for_request(ctx.trace_id.clone()));

    let status = StatusCode::from_u16(mapped.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut builder = HttpResponse::build(status);
    if let Some(seconds) = mapped.retry_after {
        builder.insert_header((header::RETRY_AFTER, seconds.to_string()));
    }
    builder.json(response)
}

#[derive(Debug, Clone)]
pub struct RequestContext {
    pub path: String,
    pub method: String,
    pub trace_id: String,
    pub language: Language,
}

impl RequestContext {
    pub fn from_request(req: &HttpRequest) -> Self {
        Self {
            path: req.path().to_string(),
            method: req.method().to_string(),
            trace_id: request_id(req),
            language: extract_language(req),
        }
    }
}

/// Standard API error wrapper for the `ResponseError` trait
///
/// Used where a handler cannot return a response directly, such as
/// middleware and extractor error handlers.
#[derive(Debug)]
pub struct StandardApiError {
    pub error: DomainError,
    pub request_context: Option<RequestContext>,
}

impl StandardApiError {
    pub fn new(error: DomainError) -> Self {
        Self {
            error,
            request_context: None,
        }
    }

    pub fn with_context(error: DomainError, req: &HttpRequest) -> Self {
        Self {
            error,
            request_context: Some(RequestContext::from_request(req)),
        }
    }
}

impl fmt::Display for StandardApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl ResponseError for StandardApiError {
    fn status_code(&self) -> StatusCode {
        let lang = self
            .request_context
            .as_ref()
            .map(|ctx| ctx.language)
            .unwrap_or_default();
        StatusCode::from_u16(map_domain_error(&self.error, lang).status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let ctx = self.request_context.clone().unwrap_or_else(|| RequestContext {
            path: String::new(),
            method: String::new(),
            trace_id: Uuid::new_v4().to_string(),
            language: Language::English,
        });
        render(&self.error, &ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use pd_core::errors::field_codes;

    #[test]
    fn test_status_mapping() {
        let lang = Language::English;
        let cases: Vec<(DomainError, u16, &str)> = vec![
            (DomainError::field("mobile", field_codes::REGEX, "bad"), 422, "VALIDATION_ERROR"),
            (OtpError::CodeRequired.into(), 422, "OTP_REQUIRED"),
            (OtpError::CodeInvalid.into(), 422, "OTP_INVALID"),
            (OtpError::CooldownActive { seconds_left: 30 }.into(), 429, "OTP_COOLDOWN"),
            (OtpError::ProviderFailure { message: "down".into() }.into(), 502, "OTP_PROVIDER_ERROR"),
            (OtpError::MobileAlreadyVerified.into(), 409, "MOBILE_ALREADY_VERIFIED"),
            (DomainError::Unauthorized, 401, "UNAUTHORIZED"),
            (DomainError::not_found("user"), 404, "NOT_FOUND"),
            (DomainError::internal("db gone"), 500, "INTERNAL_ERROR"),
        ];

        for (error, status, code) in cases {
            let mapped = map_domain_error(&error, lang);
            assert_eq!(mapped.status, status, "status for {}", error);
            assert_eq!(mapped.code, code, "code for {}", error);
        }
    }

    #[test]
    fn test_cooldown_carries_seconds_left() {
        let mapped = map_domain_error(&OtpError::CooldownActive { seconds_left: 42 }.into(), Language::English);

        assert_eq!(mapped.retry_after, Some(42));
        assert_eq!(mapped.context["seconds_left"], 42);
        assert!(mapped.message.contains("42"));
    }

    #[test]
    fn test_internal_message_is_not_exposed() {
        let mapped = map_domain_error(&DomainError::internal("connection refused at 10.0.0.3"), Language::English);
        assert!(!mapped.message.contains("10.0.0.3"));
    }

    #[test]
    fn test_validation_fields_are_localized() {
        let mut errors = ValidationErrors::new();
        errors.add_error("mobile", "Mobile format is invalid", field_codes::REGEX);
        errors.add_error("name", "Name is required", field_codes::REQUIRED);

        let fa = localize_validation(&errors, Language::Persian);
        assert_eq!(fa["mobile"], vec!["فرمت موبایل صحیح نمی‌باشد.".to_string()]);

        let en = localize_validation(&errors, Language::English);
        assert_eq!(en["name"], vec!["The name field is required.".to_string()]);
    }

    #[test]
    fn test_unknown_validation_code_keeps_domain_message() {
        let errors = ValidationErrors::single("bio", "Bio looks odd", "odd");
        let fields = localize_validation(&errors, Language::Persian);
        assert_eq!(fields["bio"], vec!["Bio looks odd".to_string()]);
    }

    #[test]
    fn test_request_id_and_language_extraction() {
        let req = TestRequest::default()
            .insert_header((REQUEST_ID_HEADER, "req-123"))
            .insert_header((header::ACCEPT_LANGUAGE, "fa-IR,fa;q=0.9"))
            .to_http_request();

        assert_eq!(request_id(&req), "req-123");
        assert_eq!(extract_language(&req), Language::Persian);

        let bare = TestRequest::default().to_http_request();
        assert_eq!(extract_language(&bare), Language::English);
        assert!(Uuid::parse_str(&request_id(&bare)).is_ok());
    }

    #[test]
    fn test_cooldown_response_sets_retry_after() {
        let req = TestRequest::default().to_http_request();
        let response = to_standard_response(&OtpError::CooldownActive { seconds_left: 30 }.into(), &req);

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "30");
    }
}
