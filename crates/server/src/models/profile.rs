//! Account and profile domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use vila_core::{AccountId, Email, ModerationStatus, ProfileId, ProfileRole};

/// An authenticated identity (domain type).
///
/// Carries only authentication data; everything the application knows about
/// a person lives on their [`Profile`].
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    /// Unique account ID.
    pub id: AccountId,
    /// Login email address.
    pub email: Email,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Application-level profile extending an [`Account`] (1:1).
///
/// Created in the same transaction as the account on registration.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    /// Unique profile ID.
    pub id: ProfileId,
    /// Owning account.
    pub account_id: AccountId,
    /// Application role (client, store owner, admin).
    pub role: ProfileRole,
    /// Moderation status; store-owner profiles start pending.
    pub status: ModerationStatus,
    /// Public display name.
    pub display_name: String,
    /// Optional contact phone.
    pub phone: Option<String>,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Whether this profile may act on the portal at all.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_public()
    }
}
