//! CLI command implementations.

pub mod admin;
pub mod check;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;

/// Errors shared by CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Repository error: {0}")]
    Repository(#[from] vila_server::db::RepositoryError),

    #[error("Auth error: {0}")]
    Auth(#[from] vila_server::services::auth::AuthError),

    #[error("Moderation error: {0}")]
    Moderation(#[from] vila_server::services::moderation::ModerationError),
}

/// Resolve the database URL from `VILA_DATABASE_URL` or `DATABASE_URL`.
pub(crate) fn database_url() -> Result<SecretString, CliError> {
    dotenvy::dotenv().ok();

    std::env::var("VILA_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CliError::MissingEnvVar("VILA_DATABASE_URL"))
}
