//! Profile repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use vila_core::{AccountId, ModerationStatus, ProfileId};

use super::{RepositoryError, parse_role, parse_status};
use crate::models::Profile;

/// Internal row type for `PostgreSQL` profile queries.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct ProfileRow {
    pub id: i32,
    pub account_id: i32,
    pub role: String,
    pub status: String,
    pub display_name: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = RepositoryError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProfileId::new(row.id),
            account_id: AccountId::new(row.account_id),
            role: parse_role(&row.role)?,
            status: parse_status(&row.status)?,
            display_name: row.display_name,
            phone: row.phone,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for profile database operations.
pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    /// Create a new profile repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a profile by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored role or status
    /// is not a canonical spelling.
    pub async fn get(&self, id: ProfileId) -> Result<Option<Profile>, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r"
            SELECT id, account_id, role, status, display_name, phone, created_at, updated_at
            FROM portal.profile
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get the profile belonging to an account (1:1).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Option<Profile>, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r"
            SELECT id, account_id, role, status, display_name, phone, created_at, updated_at
            FROM portal.profile
            WHERE account_id = $1
            ",
        )
        .bind(account_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Update the contact fields a profile owner may edit themselves.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the profile doesn't exist.
    pub async fn update_contact(
        &self,
        id: ProfileId,
        display_name: &str,
        phone: Option<&str>,
    ) -> Result<Profile, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r"
            UPDATE portal.profile
            SET display_name = $2, phone = $3, updated_at = now()
            WHERE id = $1
            RETURNING id, account_id, role, status, display_name, phone, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(display_name)
        .bind(phone)
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// List profiles with a given moderation status, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_status(
        &self,
        status: ModerationStatus,
    ) -> Result<Vec<Profile>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProfileRow>(
            r"
            SELECT id, account_id, role, status, display_name, phone, created_at, updated_at
            FROM portal.profile
            WHERE status = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(status.to_string())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Count profiles with a given moderation status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_status(&self, status: ModerationStatus) -> Result<i64, RepositoryError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM portal.profile WHERE status = $1")
            .bind(status.to_string())
            .fetch_one(self.pool)
            .await?;

        Ok(count.0)
    }

    /// Apply a guarded status transition.
    ///
    /// The expected current status is part of the WHERE clause, so a
    /// concurrent transition makes this a no-op rather than a double-apply.
    /// Returns `true` if the transition was applied.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_status(
        &self,
        id: ProfileId,
        from: ModerationStatus,
        to: ModerationStatus,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE portal.profile
            SET status = $3, updated_at = now()
            WHERE id = $1 AND status = $2
            ",
        )
        .bind(id)
        .bind(from.to_string())
        .bind(to.to_string())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
