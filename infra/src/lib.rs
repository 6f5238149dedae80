//! # Infrastructure Layer
//!
//! Concrete implementations of the ProfileDesk core traits:
//!
//! - **Database**: MySQL user and profile store using SQLx
//! - **Cache**: Redis client, OTP session state and pending code storage
//! - **OTP**: code-generating provider that hands codes to an SMS sender
//! - **SMS**: sender trait and a development sender that only logs
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client and stores
pub mod cache;

/// OTP provider backed by a code store and an SMS sender
pub mod otp;

/// SMS delivery
pub mod sms;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Stored value could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),
}
