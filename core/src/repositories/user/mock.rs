//! In-memory implementation of UserRepository for tests and local wiring

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{Profile, User};
use crate::errors::{field_codes, DomainError};

use super::trait_::UserRepository;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    profiles: HashMap<Uuid, Profile>,
}

/// Mock user repository for testing
///
/// Users and profiles sit behind one lock so `save_with_profile` is atomic.
pub struct MockUserRepository {
    tables: Arc<RwLock<Tables>>,
    saves: AtomicUsize,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
            saves: AtomicUsize::new(0),
        }
    }

    /// Seed a user directly, bypassing uniqueness checks
    pub async fn insert(&self, user: User) {
        self.tables.write().await.users.insert(user.id, user);
    }

    /// Seed a profile directly
    pub async fn insert_profile(&self, profile: Profile) {
        self.tables.write().await.profiles.insert(profile.user_id, profile);
    }

    /// Number of successful `save_with_profile` commits
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn duplicate_mobile() -> DomainError {
    DomainError::field("mobile", field_codes::UNIQUE, "Mobile number already registered")
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.profiles.get(&user_id).cloned())
    }

    async fn mobile_taken(&self, mobile: &str, exclude_id: Option<Uuid>) -> Result<bool, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .any(|u| u.mobile == mobile && Some(u.id) != exclude_id))
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.mobile == user.mobile) {
            return Err(duplicate_mobile());
        }

        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn save_with_profile(&self, user: &User, profile: &Profile) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&user.id) {
            return Err(DomainError::not_found("User"));
        }

        // Same check the unique index performs in the real store
        if tables
            .users
            .values()
            .any(|u| u.id != user.id && u.mobile == user.mobile)
        {
            return Err(duplicate_mobile());
        }

        tables.users.insert(user.id, user.clone());
        tables.profiles.insert(user.id, profile.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
