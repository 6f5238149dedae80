//! Shared utilities and common types for the ProfileDesk server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Response envelopes and error codes
//! - Mobile number and field validation helpers

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, LoggingConfig, OtpConfig, ServerConfig, SessionConfig,
};
pub use errors::error_codes;
pub use types::{DetailedResponse, ErrorDetail, Language, ResponseMeta, ResponseStatus};
pub use utils::{mobile, validation};
