//! Store repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use vila_core::{ModerationStatus, ProfileId, StoreId};

use super::{RepositoryError, parse_status};
use crate::models::Store;

/// Internal row type for `PostgreSQL` store queries.
#[derive(Debug, sqlx::FromRow)]
struct StoreRow {
    id: i32,
    owner_id: i32,
    name: String,
    address: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<StoreRow> for Store {
    type Error = RepositoryError;

    fn try_from(row: StoreRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: StoreId::new(row.id),
            owner_id: ProfileId::new(row.owner_id),
            name: row.name,
            address: row.address,
            status: parse_status(&row.status)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for store database operations.
pub struct StoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a store for an owner. New stores start pending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        owner_id: ProfileId,
        name: &str,
        address: &str,
    ) -> Result<Store, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            INSERT INTO portal.store (owner_id, name, address, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, owner_id, name, address, status, created_at, updated_at
            ",
        )
        .bind(owner_id)
        .bind(name)
        .bind(address)
        .bind(ModerationStatus::Pending.to_string())
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Get a store by ID regardless of status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: StoreId) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT id, owner_id, name, address, status, created_at, updated_at
            FROM portal.store
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a store by ID if it is publicly visible.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_public(&self, id: StoreId) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT id, owner_id, name, address, status, created_at, updated_at
            FROM portal.store
            WHERE id = $1 AND status = $2
            ",
        )
        .bind(id)
        .bind(ModerationStatus::Active.to_string())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List publicly visible stores, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_public(&self) -> Result<Vec<Store>, RepositoryError> {
        let rows = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT id, owner_id, name, address, status, created_at, updated_at
            FROM portal.store
            WHERE status = $1
            ORDER BY name ASC
            ",
        )
        .bind(ModerationStatus::Active.to_string())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List the stores owned by a profile, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_owner(&self, owner_id: ProfileId) -> Result<Vec<Store>, RepositoryError> {
        let rows = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT id, owner_id, name, address, status, created_at, updated_at
            FROM portal.store
            WHERE owner_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(owner_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List stores with a given moderation status, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_status(
        &self,
        status: ModerationStatus,
    ) -> Result<Vec<Store>, RepositoryError> {
        let rows = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT id, owner_id, name, address, status, created_at, updated_at
            FROM portal.store
            WHERE status = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(status.to_string())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Count stores with a given moderation status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_status(&self, status: ModerationStatus) -> Result<i64, RepositoryError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM portal.store WHERE status = $1")
            .bind(status.to_string())
            .fetch_one(self.pool)
            .await?;

        Ok(count.0)
    }

    /// Update a store's details, scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no store with this ID belongs
    /// to the owner.
    pub async fn update_details(
        &self,
        id: StoreId,
        owner_id: ProfileId,
        name: &str,
        address: &str,
    ) -> Result<Store, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            UPDATE portal.store
            SET name = $3, address = $4, updated_at = now()
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, name, address, status, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(owner_id)
        .bind(name)
        .bind(address)
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Apply a guarded status transition. Returns `true` if applied.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_status(
        &self,
        id: StoreId,
        from: ModerationStatus,
        to: ModerationStatus,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE portal.store
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
