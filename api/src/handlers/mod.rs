pub mod error_standard;
pub mod payload;

pub use error_standard::{to_standard_response, StandardApiError};
pub use payload::json_error_handler;
