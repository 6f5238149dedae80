//! API response envelopes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Detailed API response with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedResponse<T> {
    /// Response status
    pub status: ResponseStatus,

    /// Response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Response metadata
    pub meta: ResponseMeta,

    /// Error details if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

impl<T> DetailedResponse<T> {
    /// Successful response carrying `data`
    pub fn success(data: T, meta: ResponseMeta) -> Self {
        Self {
            status: ResponseStatus::Success,
            data: Some(data),
            meta,
            error: None,
        }
    }

    /// Error response carrying `error`
    pub fn failure(error: ErrorDetail, meta: ResponseMeta) -> Self {
        Self {
            status: ResponseStatus::Error,
            data: None,
            meta,
            error: Some(error),
        }
    }
}

/// Response status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Response metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMeta {
    /// Response timestamp
    pub timestamp: DateTime<Utc>,

    /// API version
    pub version: String,

    /// Request ID for tracing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    /// Response time in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,

    /// Additional metadata
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for ResponseMeta {
    fn default() -> Self {
        Self {
            timestamp: Utc::now(),
            version: String::from("v1"),
            request_id: None,
            response_time_ms: None,
            extra: HashMap::new(),
        }
    }
}

impl ResponseMeta {
    /// Metadata tagged with a request id
    pub fn for_request(request_id: impl Into<String>) -> Self {
        Self {
            request_id: Some(request_id.into()),
            ..Default::default()
        }
    }

    /// Attach an extra metadata entry
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Detailed error information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Error code for programmatic handling
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Field-specific errors (for validation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<HashMap<String, Vec<String>>>,

    /// Additional error context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<HashMap<String, serde_json::Value>>,
}

impl ErrorDetail {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            fields: None,
            context: None,
        }
    }

    pub fn with_fields(mut self, fields: HashMap<String, Vec<String>>) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn with_context(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.context
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response_omits_error() {
        let response = DetailedResponse::success("ok", ResponseMeta::for_request("req-1"));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["data"], "ok");
        assert_eq!(json["meta"]["request_id"], "req-1");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_meta_extra_is_flattened() {
        let meta = ResponseMeta::default().with_extra("seconds_left", serde_json::json!(30));
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["seconds_left"], 30);
    }

    #[test]
    fn test_error_detail_builders() {
        let mut fields = HashMap::new();
        fields.insert("mobile".to_string(), vec!["taken".to_string()]);
        let detail = ErrorDetail::new("VALIDATION_ERROR", "Invalid input")
            .with_fields(fields)
            .with_context("path", serde_json::json!("/api/v1/profile"));

        assert_eq!(detail.fields.unwrap()["mobile"], vec!["taken".to_string()]);
        assert_eq!(detail.context.unwrap()["path"], "/api/v1/profile");
    }
}
