//! Admin account management commands.
//!
//! Admin profiles are never self-service; this is the only way to create
//! one.

use vila_core::{Email, ModerationStatus, ProfileRole};
use vila_server::db::accounts::AccountRepository;
use vila_server::db::create_pool;
use vila_server::services::auth::hash_password;

use super::{CliError, database_url};

/// Create an admin account with an active admin profile.
///
/// # Errors
///
/// Returns `CliError` if the email is invalid, the email is already
/// registered, or the database is unreachable.
pub async fn create_admin(email: &str, name: &str, password: &str) -> Result<(), CliError> {
    let email = Email::parse(email)
        .map_err(vila_server::services::auth::AuthError::InvalidEmail)?;
    let password_hash = hash_password(password)?;

    let database_url = database_url()?;
    let pool = create_pool(&database_url).await?;

    let (account, profile) = AccountRepository::new(&pool)
        .create_with_profile(
            &email,
            &password_hash,
            name,
            ProfileRole::Admin,
            ModerationStatus::Active,
        )
        .await?;

    tracing::info!(
        account_id = %account.id,
        profile_id = %profile.id,
        email = %account.email,
        "admin account created"
    );
    Ok(())
}
