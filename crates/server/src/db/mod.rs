//! Database operations for the portal `PostgreSQL` database.
//!
//! # Tables (schema `portal`)
//!
//! - `account` / `account_password` - Authentication identities
//! - `profile` - Application profiles (role, moderation status, contact)
//! - `store` / `product` / `product_image` - Store directory
//! - `news` / `classified` / `professional` - Content records
//!
//! Sessions are stored by tower-sessions in `tower_sessions.session`.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p vila-cli -- migrate
//! ```
//!
//! # Query style
//!
//! Queries use the runtime `query`/`query_as` API with private row structs
//! deriving `sqlx::FromRow`; rows are converted into domain models via
//! `TryFrom`, which is where status and role strings are validated.

pub mod accounts;
pub mod classifieds;
pub mod news;
pub mod products;
pub mod professionals;
pub mod profiles;
pub mod stores;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use vila_core::{ModerationStatus, ProfileRole};

/// Errors that can occur during repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Parse a moderation status column, mapping bad data to `DataCorruption`.
pub(crate) fn parse_status(raw: &str) -> Result<ModerationStatus, RepositoryError> {
    raw.parse()
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid status in database: {e}")))
}

/// Parse a profile role column, mapping bad data to `DataCorruption`.
pub(crate) fn parse_role(raw: &str) -> Result<ProfileRole, RepositoryError> {
    raw.parse()
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid role in database: {e}")))
}

/// Map a sqlx error to `Conflict` when it is a unique violation.
pub(crate) fn map_unique_violation(e: sqlx::Error, message: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(message.to_owned());
    }
    RepositoryError::Database(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_rejects_legacy_spellings() {
        assert!(parse_status("active").is_ok());
        assert!(matches!(
            parse_status("ativo"),
            Err(RepositoryError::DataCorruption(_))
        ));
    }

    #[test]
    fn test_parse_role() {
        assert!(parse_role("store_owner").is_ok());
        assert!(matches!(
            parse_role("shopkeeper"),
            Err(RepositoryError::DataCorruption(_))
        ));
    }
}
