//! Malformed request bodies

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{Error, HttpRequest};
use std::collections::HashMap;

use super::error_standard::{build_error_response, MappedError, RequestContext};
use crate::i18n::get_error_message;

/// `JsonConfig` error handler that answers in the standard envelope
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    let ctx = RequestContext::from_request(req);
    log::warn!("[{}] {} {} - unreadable JSON body: {}", ctx.trace_id, ctx.method, ctx.path, err);

    let (code, message, status) = get_error_message("general", "bad_request", ctx.language)
        .unwrap_or_else(|| ("BAD_REQUEST".to_string(), "The request body could not be read.".to_string(), 400));

    let mapped = MappedError {
        code,
        message,
        status,
        fields: None,
        context: HashMap::new(),
        retry_after: None,
    };

    InternalError::from_response(err, build_error_response(mapped, &ctx)).into()
}
