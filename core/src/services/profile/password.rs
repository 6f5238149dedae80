//! Password hashing

use crate::errors::{DomainError, DomainResult};

/// Lowest cost bcrypt accepts
pub const MIN_BCRYPT_COST: u32 = 4;
/// Highest cost bcrypt accepts
pub const MAX_BCRYPT_COST: u32 = 31;

/// One-way password hashing used when a new password is saved
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plain: &str) -> DomainResult<String>;
}

/// bcrypt-backed hasher
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_BCRYPT_COST, MAX_BCRYPT_COST),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plain: &str) -> DomainResult<String> {
        bcrypt::hash(plain, self.cost).map_err(|e| {
            tracing::error!(error = %e, event = "password_hash_failed", "Failed to hash password");
            DomainError::internal(format!("Failed to hash password: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_salted_bcrypt() {
        let hasher = BcryptPasswordHasher::new(MIN_BCRYPT_COST);
        let hash = hasher.hash("abc123").unwrap();

        assert!(hash.starts_with("$2b$04$"));
        assert_ne!(hash, hasher.hash("abc123").unwrap());
        assert!(bcrypt::verify("abc123", &hash).unwrap());
        assert!(!bcrypt::verify("abc124", &hash).unwrap());
    }

    #[test]
    fn test_cost_is_clamped() {
        assert_eq!(BcryptPasswordHasher::new(1).cost(), MIN_BCRYPT_COST);
        assert_eq!(BcryptPasswordHasher::new(99).cost(), MAX_BCRYPT_COST);
    }
}
