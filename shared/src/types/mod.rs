//! Type definitions shared by the API and domain layers
//!
//! - `language` - Internationalization and language types
//! - `response` - API response envelopes

pub mod language;
pub mod response;

pub use language::Language;
pub use response::{DetailedResponse, ErrorDetail, ResponseMeta, ResponseStatus};
