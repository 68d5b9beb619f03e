//! Session-related types.
//!
//! Types stored in the session for authentication state. The session holds
//! only the identity; role and status are re-fetched from the database on
//! every request so that moderation decisions take effect immediately.

use serde::{Deserialize, Serialize};

use vila_core::{AccountId, Email, ProfileId};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Account ID of the logged-in identity.
    pub account_id: AccountId,
    /// Profile ID of the logged-in identity.
    pub profile_id: ProfileId,
    /// Login email address.
    pub email: Email,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
