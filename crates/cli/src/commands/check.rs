//! Database diagnostics command.
//!
//! Replaces the one-off diagnostic scripts the portal used to accumulate:
//! verifies connectivity, lists applied migrations, and reports pending
//! moderation counts.

use chrono::{DateTime, Utc};

use vila_core::ModerationStatus;
use vila_server::db::classifieds::ClassifiedRepository;
use vila_server::db::create_pool;
use vila_server::db::news::NewsRepository;
use vila_server::db::professionals::ProfessionalRepository;
use vila_server::db::profiles::ProfileRepository;
use vila_server::db::stores::StoreRepository;

use super::{CliError, database_url};

/// Applied migration row from sqlx's ledger.
#[derive(Debug, sqlx::FromRow)]
struct AppliedMigration {
    version: i64,
    description: String,
    installed_on: DateTime<Utc>,
}

/// Run connectivity and migration-state diagnostics.
///
/// # Errors
///
/// Returns `CliError` if the database is unreachable.
#[allow(clippy::print_stdout)]
pub async fn run() -> Result<(), CliError> {
    let database_url = database_url()?;
    let pool = create_pool(&database_url).await?;

    sqlx::query("SELECT 1").execute(&pool).await?;
    println!("connectivity: ok");

    let migrations = sqlx::query_as::<_, AppliedMigration>(
        r"
        SELECT version, description, installed_on
        FROM _sqlx_migrations
        ORDER BY version ASC
        ",
    )
    .fetch_all(&pool)
    .await;

    match migrations {
        Ok(rows) => {
            println!("applied migrations: {}", rows.len());
            for m in rows {
                println!("  {} {} ({})", m.version, m.description, m.installed_on);
            }
        }
        Err(_) => println!("applied migrations: none (run `vila-cli migrate`)"),
    }

    let pending = ModerationStatus::Pending;
    println!(
        "pending moderation: profiles={} stores={} news={} classifieds={} professionals={}",
        ProfileRepository::new(&pool).count_by_status(pending).await?,
        StoreRepository::new(&pool).count_by_status(pending).await?,
        NewsRepository::new(&pool).count_by_status(pending).await?,
        ClassifiedRepository::new(&pool)
            .count_by_status(pending)
            .await?,
        ProfessionalRepository::new(&pool)
            .count_by_status(pending)
            .await?,
    );

    Ok(())
}
