//! Professional directory repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use vila_core::{ModerationStatus, ProfessionalId, ProfileId};

use super::{RepositoryError, parse_status};
use crate::models::Professional;

/// Internal row type for `PostgreSQL` professional listing queries.
#[derive(Debug, sqlx::FromRow)]
struct ProfessionalRow {
    id: i32,
    created_by: i32,
    name: String,
    profession: String,
    phone: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProfessionalRow> for Professional {
    type Error = RepositoryError;

    fn try_from(row: ProfessionalRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProfessionalId::new(row.id),
            created_by: ProfileId::new(row.created_by),
            name: row.name,
            profession: row.profession,
            phone: row.phone,
            status: parse_status(&row.status)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for professional directory database operations.
pub struct ProfessionalRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfessionalRepository<'a> {
    /// Create a new professional repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a directory listing. New listings start pending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        created_by: ProfileId,
        name: &str,
        profession: &str,
        phone: Option<&str>,
    ) -> Result<Professional, RepositoryError> {
        let row = sqlx::query_as::<_, ProfessionalRow>(
            r"
            INSERT INTO portal.professional (created_by, name, profession, phone, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, created_by, name, profession, phone, status, created_at, updated_at
            ",
        )
        .bind(created_by)
        .bind(name)
        .bind(profession)
        .bind(phone)
        .bind(ModerationStatus::Pending.to_string())
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Get a listing by ID regardless of status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProfessionalId) -> Result<Option<Professional>, RepositoryError> {
        let row = sqlx::query_as::<_, ProfessionalRow>(
            r"
            SELECT id, created_by, name, profession, phone, status, created_at, updated_at
            FROM portal.professional
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a listing by ID if it is publicly visible.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_public(
        &self,
        id: ProfessionalId,
    ) -> Result<Option<Professional>, RepositoryError> {
        let row = sqlx::query_as::<_, ProfessionalRow>(
            r"
            SELECT id, created_by, name, profession, phone, status, created_at, updated_at
            FROM portal.professional
            WHERE id = $1 AND status = $2
            ",
        )
        .bind(id)
        .bind(ModerationStatus::Active.to_string())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List publicly visible listings, ordered by profession then name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_public(&self) -> Result<Vec<Professional>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProfessionalRow>(
            r"
            SELECT id, created_by, name, profession, phone, status, created_at, updated_at
            FROM portal.professional
            WHERE status = $1
            ORDER BY profession ASC, name ASC
            ",
        )
        .bind(ModerationStatus::Active.to_string())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List listings with a given moderation status, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_status(
        &self,
        status: ModerationStatus,
    ) -> Result<Vec<Professional>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProfessionalRow>(
            r"
            SELECT id, created_by, name, profession, phone, status, created_at, updated_at
            FROM portal.professional
            WHERE status = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(status.to_string())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Count listings with a given moderation status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_status(&self, status: ModerationStatus) -> Result<i64, RepositoryError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM portal.professional WHERE status = $1")
                .bind(status.to_string())
                .fetch_one(self.pool)
                .await?;

        Ok(count.0)
    }

    /// Apply a guarded status transition. Returns `true` if applied.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_status(
        &self,
        id: ProfessionalId,
        from: ModerationStatus,
        to: ModerationStatus,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE portal.professional
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
