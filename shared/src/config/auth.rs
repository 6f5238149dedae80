//! Authentication configuration
//!
//! Tokens are issued elsewhere; this service only verifies them and scopes
//! OTP cooldown state to the session they carry.

use serde::{Deserialize, Serialize};

const DEFAULT_JWT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT verification configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared secret used to verify HS256 signatures
    pub secret: String,

    /// Expected issuer claim
    pub issuer: String,

    /// Expected audience claim (not checked when absent)
    #[serde(default)]
    pub audience: Option<String>,

    /// Accepted clock skew in seconds
    #[serde(default = "default_leeway")]
    pub leeway: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            issuer: String::from("profiledesk"),
            audience: None,
            leeway: default_leeway(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Require a specific audience claim
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}

/// Session configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Session lifetime in seconds; session-scoped OTP state expires with it
    pub timeout: u64,

    /// Key prefix for session-scoped entries in Redis
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout: 7200,
            key_prefix: default_key_prefix(),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Session configuration
    #[serde(default)]
    pub session: SessionConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string());
        let issuer = std::env::var("JWT_ISSUER").unwrap_or_else(|_| "profiledesk".to_string());
        let audience = std::env::var("JWT_AUDIENCE").ok();
        let timeout = std::env::var("SESSION_TIMEOUT")
            .unwrap_or_else(|_| "7200".to_string())
            .parse()
            .unwrap_or(7200);

        Self {
            jwt: JwtConfig {
                secret,
                issuer,
                audience,
                leeway: default_leeway(),
            },
            session: SessionConfig {
                timeout,
                ..Default::default()
            },
        }
    }

    /// Get JWT secret
    pub fn jwt_secret(&self) -> &str {
        &self.jwt.secret
    }
}

fn default_leeway() -> u64 {
    30
}

fn default_key_prefix() -> String {
    String::from("otp_session")
}
