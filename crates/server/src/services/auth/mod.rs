//! Authentication service.
//!
//! Provides email + password registration and login. Registration creates
//! the account, its password entry and its profile in one transaction.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde::Deserialize;
use sqlx::PgPool;

use vila_core::{Email, ModerationStatus, ProfileRole};

use crate::db::RepositoryError;
use crate::db::accounts::AccountRepository;
use crate::db::profiles::ProfileRepository;
use crate::models::{Account, Profile};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Role a visitor may request at registration time.
///
/// Admin profiles are never self-service; they are created through
/// `vila-cli admin create`.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RegisterRole {
    /// Regular resident account, active immediately.
    #[default]
    Client,
    /// Store owner, pending until approved by an admin.
    StoreOwner,
}

impl RegisterRole {
    /// Profile role this registration produces.
    #[must_use]
    pub const fn profile_role(self) -> ProfileRole {
        match self {
            Self::Client => ProfileRole::Client,
            Self::StoreOwner => ProfileRole::StoreOwner,
        }
    }

    /// Initial moderation status: store owners need admin approval.
    #[must_use]
    pub const fn initial_status(self) -> ModerationStatus {
        match self {
            Self::Client => ModerationStatus::Active,
            Self::StoreOwner => ModerationStatus::Pending,
        }
    }
}

/// Authentication service.
///
/// Handles registration and login against the local account tables.
pub struct AuthService<'a> {
    accounts: AccountRepository<'a>,
    profiles: ProfileRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            accounts: AccountRepository::new(pool),
            profiles: ProfileRepository::new(pool),
        }
    }

    /// Register a new identity with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::AccountAlreadyExists` if the email is already registered.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
        role: RegisterRole,
    ) -> Result<(Account, Profile), AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;
        validate_display_name(display_name)?;

        let password_hash = hash_password(password)?;

        let created = self
            .accounts
            .create_with_profile(
                &email,
                &password_hash,
                display_name.trim(),
                role.profile_role(),
                role.initial_status(),
            )
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::AccountAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(created)
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    /// Returns `AuthError::AccountBlocked` if the profile has been blocked.
    pub async fn login(&self, email: &str, password: &str) -> Result<(Account, Profile), AuthError> {
        let email = Email::parse(email)?;

        let (account, password_hash) = self
            .accounts
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        let profile = self
            .profiles
            .get_by_account(account.id)
            .await?
            .ok_or_else(|| {
                AuthError::Repository(RepositoryError::DataCorruption(
                    "account has no profile".to_owned(),
                ))
            })?;

        // Blocked identities cannot sign in at all; pending ones can (they
        // see their own status), they just cannot do gated actions.
        if profile.status == ModerationStatus::Blocked {
            return Err(AuthError::AccountBlocked);
        }

        Ok((account, profile))
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Validate the display name is non-empty after trimming.
fn validate_display_name(display_name: &str) -> Result<(), AuthError> {
    if display_name.trim().is_empty() {
        return Err(AuthError::InvalidDisplayName(
            "display name cannot be empty".to_owned(),
        ));
    }
    Ok(())
}

/// Hash a password using Argon2id.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password_too_short() {
        assert!(matches!(
            validate_password("1234567"),
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[test]
    fn test_validate_password_ok() {
        assert!(validate_password("12345678").is_ok());
    }

    #[test]
    fn test_validate_display_name() {
        assert!(validate_display_name("Maria").is_ok());
        assert!(validate_display_name("   ").is_err());
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong password", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_register_role_mapping() {
        assert_eq!(
            RegisterRole::Client.initial_status(),
            ModerationStatus::Active
        );
        assert_eq!(
            RegisterRole::StoreOwner.initial_status(),
            ModerationStatus::Pending
        );
        assert_eq!(
            RegisterRole::StoreOwner.profile_role(),
            ProfileRole::StoreOwner
        );
    }
}
