//! MySQL implementation of the UserRepository trait.
//!
//! Users and profiles live in two tables. `save_with_profile` writes both
//! inside one transaction and relies on the unique index on `users.mobile`
//! to settle concurrent claims on the same number.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use pd_core::errors::{field_codes, DomainError};
use pd_core::repositories::UserRepository;
use pd_core::{Profile, User};

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(column_error("id"))?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::internal(format!("Invalid UUID: {}", e)))?,
            name: row.try_get("name").map_err(column_error("name"))?,
            family: row.try_get("family").map_err(column_error("family"))?,
            mobile: row.try_get("mobile").map_err(column_error("mobile"))?,
            mobile_verified_at: row
                .try_get::<Option<DateTime<Utc>>, _>("mobile_verified_at")
                .map_err(column_error("mobile_verified_at"))?,
            password: row.try_get("password").map_err(column_error("password"))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(column_error("created_at"))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(column_error("updated_at"))?,
        })
    }

    /// Convert database row to Profile entity
    fn row_to_profile(row: &MySqlRow) -> Result<Profile, DomainError> {
        let user_id: String = row.try_get("user_id").map_err(column_error("user_id"))?;

        Ok(Profile {
            user_id: Uuid::parse_str(&user_id)
                .map_err(|e| DomainError::internal(format!("Invalid UUID: {}", e)))?,
            bio: row.try_get("bio").map_err(column_error("bio"))?,
            avatar_url: row.try_get("avatar_url").map_err(column_error("avatar_url"))?,
            birth_date: row
                .try_get::<Option<NaiveDate>, _>("birth_date")
                .map_err(column_error("birth_date"))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(column_error("updated_at"))?,
        })
    }
}

fn column_error(column: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::internal(format!("Failed to get {}: {}", column, e))
}

/// Map a write error, turning the mobile unique index violation into a field error
fn map_write_error(e: sqlx::Error) -> DomainError {
    if is_duplicate_mobile(&e) {
        return DomainError::field("mobile", field_codes::UNIQUE, "Mobile number already registered");
    }
    tracing::error!(error = %e, event = "user_write_failed", "User store write failed");
    DomainError::internal(format!("Database write failed: {}", e))
}

fn is_duplicate_mobile(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db) => db.is_unique_violation() && db.message().contains("mobile"),
        _ => false,
    }
}

fn query_error(e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, event = "user_query_failed", "User store query failed");
    DomainError::internal(format!("Database query failed: {}", e))
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, name, family, mobile, mobile_verified_at, password,
                   created_at, updated_at
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>, DomainError> {
        let query = r#"
            SELECT user_id, bio, avatar_url, birth_date, updated_at
            FROM profiles
            WHERE user_id = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(Self::row_to_profile).transpose()
    }

    async fn mobile_taken(&self, mobile: &str, exclude_id: Option<Uuid>) -> Result<bool, DomainError> {
        let query = r#"
            SELECT COUNT(*) AS count
            FROM users
            WHERE mobile = ? AND (? IS NULL OR id <> ?)
        "#;
        let exclude = exclude_id.map(|id| id.to_string());

        let row = sqlx::query(query)
            .bind(mobile)
            .bind(exclude.as_deref())
            .bind(exclude.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)?;

        let count: i64 = row.try_get("count").map_err(column_error("count"))?;
        Ok(count > 0)
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, name, family, mobile, mobile_verified_at, password,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.family)
            .bind(&user.mobile)
            .bind(user.mobile_verified_at)
            .bind(&user.password)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;

        Ok(user)
    }

    async fn save_with_profile(&self, user: &User, profile: &Profile) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(query_error)?;

        let updated = sqlx::query(
            r#"
            UPDATE users SET
                name = ?,
                family = ?,
                mobile = ?,
                mobile_verified_at = ?,
                password = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.name)
        .bind(&user.family)
        .bind(&user.mobile)
        .bind(user.mobile_verified_at)
        .bind(&user.password)
        .bind(user.updated_at)
        .bind(user.id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(map_write_error)?;

        if updated.rows_affected() == 0 {
            // MySQL reports zero affected rows for unchanged values too
            let exists = sqlx::query("SELECT 1 FROM users WHERE id = ?")
                .bind(user.id.to_string())
                .fetch_optional(&mut *tx)
                .await
                .map_err(query_error)?;
            if exists.is_none() {
                return Err(DomainError::not_found("User"));
            }
        }

        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, bio, avatar_url, birth_date, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                bio = VALUES(bio),
                avatar_url = VALUES(avatar_url),
                birth_date = VALUES(birth_date),
                updated_at = VALUES(updated_at)
            "#,
        )
        .bind(profile.user_id.to_string())
        .bind(&profile.bio)
        .bind(&profile.avatar_url)
        .bind(profile.birth_date)
        .bind(profile.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_write_error)?;

        tx.commit().await.map_err(query_error)?;

        tracing::debug!(user_id = %user.id, event = "user_profile_committed", "User and profile committed");
        Ok(())
    }
}
