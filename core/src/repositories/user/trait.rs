//! User repository trait defining the interface for user data persistence.
//!
//! The store owns both the user record and its dependent profile record.
//! Writes that touch both go through [`UserRepository::save_with_profile`]
//! so they commit or fail together.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Profile, User};
use crate::errors::DomainError;

/// Repository trait for User and Profile persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given ID
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find the profile record belonging to a user
    ///
    /// A user without a saved profile yields `Ok(None)`.
    async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>, DomainError>;

    /// Check whether a mobile number is held by any user
    ///
    /// # Arguments
    /// * `mobile` - Mobile number in local format
    /// * `exclude_id` - User to ignore, normally the one being edited
    async fn mobile_taken(&self, mobile: &str, exclude_id: Option<Uuid>) -> Result<bool, DomainError>;

    /// Create a new user in the repository
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Validation)` - The mobile number is already registered
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Persist a user together with its profile in one atomic write
    ///
    /// The profile row is inserted if it does not exist yet. Nothing is
    /// written when any part fails.
    ///
    /// # Returns
    /// * `Ok(())` - Both records committed
    /// * `Err(DomainError::Validation)` - Mobile number collides with another user
    /// * `Err(DomainError::NotFound)` - The user does not exist
    async fn save_with_profile(&self, user: &User, profile: &Profile) -> Result<(), DomainError>;
}
