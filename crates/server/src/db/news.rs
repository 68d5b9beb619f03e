//! News repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use vila_core::{ModerationStatus, NewsId, ProfileId};

use super::{RepositoryError, parse_status};
use crate::models::NewsItem;

/// Internal row type for `PostgreSQL` news queries.
#[derive(Debug, sqlx::FromRow)]
struct NewsRow {
    id: i32,
    created_by: i32,
    title: String,
    body: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<NewsRow> for NewsItem {
    type Error = RepositoryError;

    fn try_from(row: NewsRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: NewsId::new(row.id),
            created_by: ProfileId::new(row.created_by),
            title: row.title,
            body: row.body,
            status: parse_status(&row.status)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for news database operations.
pub struct NewsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> NewsRepository<'a> {
    /// Create a new news repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a news article.
    ///
    /// Admin-authored articles are created active; the caller decides.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        created_by: ProfileId,
        title: &str,
        body: &str,
        status: ModerationStatus,
    ) -> Result<NewsItem, RepositoryError> {
        let row = sqlx::query_as::<_, NewsRow>(
            r"
            INSERT INTO portal.news (created_by, title, body, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, created_by, title, body, status, created_at, updated_at
            ",
        )
        .bind(created_by)
        .bind(title)
        .bind(body)
        .bind(status.to_string())
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Get an article by ID regardless of status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: NewsId) -> Result<Option<NewsItem>, RepositoryError> {
        let row = sqlx::query_as::<_, NewsRow>(
            r"
            SELECT id, created_by, title, body, status, created_at, updated_at
            FROM portal.news
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get an article by ID if it is publicly visible.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_public(&self, id: NewsId) -> Result<Option<NewsItem>, RepositoryError> {
        let row = sqlx::query_as::<_, NewsRow>(
            r"
            SELECT id, created_by, title, body, status, created_at, updated_at
            FROM portal.news
            WHERE id = $1 AND status = $2
            ",
        )
        .bind(id)
        .bind(ModerationStatus::Active.to_string())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List publicly visible articles, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_public(&self) -> Result<Vec<NewsItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, NewsRow>(
            r"
            SELECT id, created_by, title, body, status, created_at, updated_at
            FROM portal.news
            WHERE status = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(ModerationStatus::Active.to_string())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List articles with a given moderation status, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_status(
        &self,
        status: ModerationStatus,
    ) -> Result<Vec<NewsItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, NewsRow>(
            r"
            SELECT id, created_by, title, body, status, created_at, updated_at
            FROM portal.news
            WHERE status = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(status.to_string())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Count articles with a given moderation status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_status(&self, status: ModerationStatus) -> Result<i64, RepositoryError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM portal.news WHERE status = $1")
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
        id: NewsId,
        from: ModerationStatus,
        to: ModerationStatus,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE portal.news
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
