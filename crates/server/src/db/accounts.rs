//! Account repository for database operations.
//!
//! Accounts hold authentication data only; the password hash lives in a
//! separate `account_password` table and the application-level profile is
//! created in the same transaction as the account.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use vila_core::{AccountId, Email, ModerationStatus, ProfileRole};

use super::profiles::ProfileRow;
use super::{RepositoryError, map_unique_violation};
use crate::models::{Account, Profile};

/// Internal row type for `PostgreSQL` account queries.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: i32,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = RepositoryError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: AccountId::new(row.id),
            email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for account database operations.
pub struct AccountRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AccountRepository<'a> {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get an account by its email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<Account>, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r"
            SELECT id, email, created_at, updated_at
            FROM portal.account
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create an account, its password entry, and its profile in one
    /// transaction.
    ///
    /// The profile is created together with the account ("on first
    /// sign-in"): there is never an account without a profile.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_with_profile(
        &self,
        email: &Email,
        password_hash: &str,
        display_name: &str,
        role: ProfileRole,
        status: ModerationStatus,
    ) -> Result<(Account, Profile), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let account_row = sqlx::query_as::<_, AccountRow>(
            r"
            INSERT INTO portal.account (email)
            VALUES ($1)
            RETURNING id, email, created_at, updated_at
            ",
        )
        .bind(email)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, "email already exists"))?;

        sqlx::query(
            r"
            INSERT INTO portal.account_password (account_id, password_hash)
            VALUES ($1, $2)
            ",
        )
        .bind(account_row.id)
        .bind(password_hash)
        .execute(&mut *tx)
        .await?;

        let profile_row = sqlx::query_as::<_, ProfileRow>(
            r"
            INSERT INTO portal.profile (account_id, role, status, display_name)
            VALUES ($1, $2, $3, $4)
            RETURNING id, account_id, role, status, display_name, phone, created_at, updated_at
            ",
        )
        .bind(account_row.id)
        .bind(role.to_string())
        .bind(status.to_string())
        .bind(display_name)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((account_row.try_into()?, profile_row.try_into()?))
    }

    /// Get an account and its password hash by email.
    ///
    /// Returns `None` if the account doesn't exist or has no password set.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(Account, String)>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct AccountPasswordRow {
            id: i32,
            email: String,
            created_at: DateTime<Utc>,
            updated_at: DateTime<Utc>,
            password_hash: Option<String>,
        }

        let row = sqlx::query_as::<_, AccountPasswordRow>(
            r"
            SELECT a.id, a.email, a.created_at, a.updated_at, p.password_hash
            FROM portal.account a
            LEFT JOIN portal.account_password p ON a.id = p.account_id
            WHERE a.email = $1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let Some(password_hash) = row.password_hash else {
            return Ok(None);
        };

        let account = AccountRow {
            id: row.id,
            email: row.email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
        .try_into()?;

        Ok(Some((account, password_hash)))
    }
}
