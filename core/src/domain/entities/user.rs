//! User entity and its dependent profile record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::ProfileFields;

/// User entity representing an administrator account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Given name
    pub name: String,

    /// Family name
    pub family: String,

    /// Mobile number in local format (`09xxxxxxxxx`), unique across users
    pub mobile: String,

    /// When the mobile number was verified; `None` means unverified
    pub mobile_verified_at: Option<DateTime<Utc>>,

    /// Password hash, never serialized into responses
    #[serde(skip_serializing, default)]
    pub password: String,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new unverified user
    pub fn new(
        name: impl Into<String>,
        family: impl Into<String>,
        mobile: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            family: family.into(),
            mobile: mobile.into(),
            mobile_verified_at: None,
            password: password_hash.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks whether the mobile number has been verified
    pub fn is_mobile_verified(&self) -> bool {
        self.mobile_verified_at.is_some()
    }

    /// Assigns a freshly verified mobile number
    ///
    /// The mobile and its verification timestamp always change together.
    pub fn verify_mobile(&mut self, mobile: impl Into<String>, at: DateTime<Utc>) {
        self.mobile = mobile.into();
        self.mobile_verified_at = Some(at);
        self.updated_at = at;
    }

    /// Overwrites the display names
    pub fn rename(&mut self, name: impl Into<String>, family: impl Into<String>) {
        self.name = name.into();
        self.family = family.into();
        self.updated_at = Utc::now();
    }

    /// Replaces the stored password hash
    pub fn set_password_hash(&mut self, hash: impl Into<String>) {
        self.password = hash.into();
        self.updated_at = Utc::now();
    }
}

/// Non-identity profile attributes, 1:1 with [`User`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Owning user
    pub user_id: Uuid,

    /// Free-form biography
    pub bio: Option<String>,

    /// Avatar location
    pub avatar_url: Option<String>,

    /// Date of birth
    pub birth_date: Option<NaiveDate>,

    /// Timestamp when the profile was last updated
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Creates an empty profile for a user
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            bio: None,
            avatar_url: None,
            birth_date: None,
            updated_at: Utc::now(),
        }
    }

    /// Overwrites every profile attribute with the submitted values
    pub fn apply(&mut self, fields: &ProfileFields) {
        self.bio = fields.bio.clone();
        self.avatar_url = fields.avatar_url.clone();
        self.birth_date = fields.birth_date;
        self.updated_at = Utc::now();
    }
}
