//! Classified ads repository for database operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use vila_core::{ClassifiedId, CurrencyCode, ModerationStatus, Price, ProfileId};

use super::{RepositoryError, parse_status};
use crate::models::Classified;

/// Internal row type for `PostgreSQL` classified queries.
///
/// The asking price is optional; when present both amount and currency
/// columns are set together (enforced by a table CHECK constraint).
#[derive(Debug, sqlx::FromRow)]
struct ClassifiedRow {
    id: i32,
    created_by: i32,
    title: String,
    body: String,
    price_amount: Option<Decimal>,
    price_currency: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ClassifiedRow> for Classified {
    type Error = RepositoryError;

    fn try_from(row: ClassifiedRow) -> Result<Self, Self::Error> {
        let price = match (row.price_amount, row.price_currency) {
            (Some(amount), Some(currency)) => {
                let currency: CurrencyCode = currency.parse().map_err(|e| {
                    RepositoryError::DataCorruption(format!("invalid currency in database: {e}"))
                })?;
                Some(Price::new(amount, currency))
            }
            (None, None) => None,
            _ => {
                return Err(RepositoryError::DataCorruption(
                    "classified price amount and currency must be set together".to_owned(),
                ));
            }
        };

        Ok(Self {
            id: ClassifiedId::new(row.id),
            created_by: ProfileId::new(row.created_by),
            title: row.title,
            body: row.body,
            price,
            status: parse_status(&row.status)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for classified ad database operations.
pub struct ClassifiedRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ClassifiedRepository<'a> {
    /// Create a new classified repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a classified ad. New ads start pending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        created_by: ProfileId,
        title: &str,
        body: &str,
        price: Option<Price>,
    ) -> Result<Classified, RepositoryError> {
        let row = sqlx::query_as::<_, ClassifiedRow>(
            r"
            INSERT INTO portal.classified
                (created_by, title, body, price_amount, price_currency, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, created_by, title, body, price_amount, price_currency,
                      status, created_at, updated_at
            ",
        )
        .bind(created_by)
        .bind(title)
        .bind(body)
        .bind(price.map(|p| p.amount))
        .bind(price.map(|p| p.currency.code()))
        .bind(ModerationStatus::Pending.to_string())
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Get an ad by ID regardless of status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ClassifiedId) -> Result<Option<Classified>, RepositoryError> {
        let row = sqlx::query_as::<_, ClassifiedRow>(
            r"
            SELECT id, created_by, title, body, price_amount, price_currency,
                   status, created_at, updated_at
            FROM portal.classified
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get an ad by ID if it is publicly visible.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_public(
        &self,
        id: ClassifiedId,
    ) -> Result<Option<Classified>, RepositoryError> {
        let row = sqlx::query_as::<_, ClassifiedRow>(
            r"
            SELECT id, created_by, title, body, price_amount, price_currency,
                   status, created_at, updated_at
            FROM portal.classified
            WHERE id = $1 AND status = $2
            ",
        )
        .bind(id)
        .bind(ModerationStatus::Active.to_string())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List publicly visible ads, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_public(&self) -> Result<Vec<Classified>, RepositoryError> {
        let rows = sqlx::query_as::<_, ClassifiedRow>(
            r"
            SELECT id, created_by, title, body, price_amount, price_currency,
                   status, created_at, updated_at
            FROM portal.classified
            WHERE status = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(ModerationStatus::Active.to_string())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List ads with a given moderation status, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_status(
        &self,
        status: ModerationStatus,
    ) -> Result<Vec<Classified>, RepositoryError> {
        let rows = sqlx::query_as::<_, ClassifiedRow>(
            r"
            SELECT id, created_by, title, body, price_amount, price_currency,
                   status, created_at, updated_at
            FROM portal.classified
            WHERE status = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(status.to_string())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Count ads with a given moderation status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_status(&self, status: ModerationStatus) -> Result<i64, RepositoryError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM portal.classified WHERE status = $1")
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
        id: ClassifiedId,
        from: ModerationStatus,
        to: ModerationStatus,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE portal.classified
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
