//! Cache module for Redis-backed state
//!
//! Provides the Redis client with retry logic plus the two stores built on
//! it: per-session OTP state and pending OTP codes.

pub mod otp_code_store;
pub mod redis_client;
pub mod session_store;

#[cfg(test)]
mod tests;

pub use otp_code_store::RedisOtpCodeStore;
pub use redis_client::RedisClient;
pub use session_store::RedisOtpSessionStore;

// Re-export commonly used types
pub use pd_shared::CacheConfig;
