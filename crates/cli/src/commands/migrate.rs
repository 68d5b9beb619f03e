//! Database migration command.
//!
//! Applies the versioned migration list in `crates/server/migrations/` in
//! order. sqlx records each applied version and its checksum in
//! `_sqlx_migrations` and refuses to re-run a file whose content changed,
//! so the list is safe to apply repeatedly.
//!
//! # Environment Variables
//!
//! - `VILA_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string

use secrecy::ExposeSecret;
use sqlx::PgPool;

use super::{CliError, database_url};

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns `CliError` if the database URL is missing, the connection
/// fails, or a migration fails to apply.
pub async fn run() -> Result<(), CliError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
