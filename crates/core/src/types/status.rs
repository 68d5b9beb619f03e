//! Roles and moderation statuses for portal records.
//!
//! Every moderated record (profile, store, news, classified, professional
//! listing) carries a [`ModerationStatus`]. Transitions are validated here,
//! in one place, and nowhere else: repositories and handlers call
//! [`ModerationStatus::transition`] instead of comparing strings.

use serde::{Deserialize, Serialize};

/// Application role attached to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileRole {
    /// Regular resident account: can browse and post moderated content.
    Client,
    /// Can create a store and manage its products once approved.
    StoreOwner,
    /// Full access to the moderation dashboard.
    Admin,
}

impl ProfileRole {
    /// Whether this role grants access to the admin area.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// The authorization gate: does a (possibly absent) role grant admin access?
///
/// Fails closed: an absent profile never grants access.
#[must_use]
pub const fn grants_admin(role: Option<ProfileRole>) -> bool {
    matches!(role, Some(ProfileRole::Admin))
}

impl std::fmt::Display for ProfileRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Client => write!(f, "client"),
            Self::StoreOwner => write!(f, "store_owner"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for ProfileRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Self::Client),
            "store_owner" => Ok(Self::StoreOwner),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid profile role: {s}")),
        }
    }
}

/// Moderation status shared by every moderated record.
///
/// Only the canonical spellings below are accepted at the write boundary;
/// legacy free-text values have no representation here on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModerationStatus {
    /// Awaiting an admin decision. Not publicly visible.
    #[default]
    Pending,
    /// Approved and publicly visible.
    Active,
    /// Rejected or suspended. Not publicly visible.
    Blocked,
}

/// An admin-gated action on a moderated record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationAction {
    /// pending -> active
    Approve,
    /// pending -> blocked, active -> blocked (suspend)
    Block,
}

/// A transition that the moderation policy does not permit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot {action:?} a record with status {from}")]
pub struct TransitionError {
    /// Status the record currently has.
    pub from: ModerationStatus,
    /// Action that was attempted.
    pub action: ModerationAction,
}

impl ModerationStatus {
    /// Apply a moderation action, validating it against the policy.
    ///
    /// Permitted transitions:
    /// - `Pending` + `Approve` -> `Active`
    /// - `Pending` + `Block`   -> `Blocked`
    /// - `Active`  + `Block`   -> `Blocked` (suspend)
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError`] for every other combination, including
    /// re-applying an action a record has already received.
    pub const fn transition(self, action: ModerationAction) -> Result<Self, TransitionError> {
        match (self, action) {
            (Self::Pending, ModerationAction::Approve) => Ok(Self::Active),
            (Self::Pending | Self::Active, ModerationAction::Block) => Ok(Self::Blocked),
            (from, action) => Err(TransitionError { from, action }),
        }
    }

    /// Whether records with this status are publicly visible.
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Active => write!(f, "active"),
            Self::Blocked => write!(f, "blocked"),
        }
    }
}

impl std::str::FromStr for ModerationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "blocked" => Ok(Self::Blocked),
            _ => Err(format!("invalid moderation status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_requires_admin_role() {
        assert!(grants_admin(Some(ProfileRole::Admin)));
        assert!(!grants_admin(Some(ProfileRole::Client)));
        assert!(!grants_admin(Some(ProfileRole::StoreOwner)));
    }

    #[test]
    fn test_gate_fails_closed_without_profile() {
        assert!(!grants_admin(None));
    }

    #[test]
    fn test_transition_matrix() {
        use ModerationAction::{Approve, Block};
        use ModerationStatus::{Active, Blocked, Pending};

        assert_eq!(Pending.transition(Approve), Ok(Active));
        assert_eq!(Pending.transition(Block), Ok(Blocked));
        assert_eq!(Active.transition(Block), Ok(Blocked));

        // Everything else is rejected.
        assert!(Active.transition(Approve).is_err());
        assert!(Blocked.transition(Approve).is_err());
        assert!(Blocked.transition(Block).is_err());
    }

    #[test]
    fn test_transition_error_reports_context() {
        let err = ModerationStatus::Blocked
            .transition(ModerationAction::Approve)
            .unwrap_err();
        assert_eq!(err.from, ModerationStatus::Blocked);
        assert_eq!(err.action, ModerationAction::Approve);
    }

    #[test]
    fn test_public_visibility() {
        assert!(ModerationStatus::Active.is_public());
        assert!(!ModerationStatus::Pending.is_public());
        assert!(!ModerationStatus::Blocked.is_public());
    }

    #[test]
    fn test_status_parse_canonical_only() {
        assert_eq!(
            "active".parse::<ModerationStatus>().unwrap(),
            ModerationStatus::Active
        );
        // Legacy free-text spellings are rejected at the write boundary.
        assert!("ativo".parse::<ModerationStatus>().is_err());
        assert!("ACTIVE".parse::<ModerationStatus>().is_err());
        assert!("".parse::<ModerationStatus>().is_err());
    }

    #[test]
    fn test_role_parse_roundtrip() {
        for role in [
            ProfileRole::Client,
            ProfileRole::StoreOwner,
            ProfileRole::Admin,
        ] {
            let parsed: ProfileRole = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
        assert!("superuser".parse::<ProfileRole>().is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&ProfileRole::StoreOwner).unwrap(),
            "\"store_owner\""
        );
        assert_eq!(
            serde_json::to_string(&ModerationStatus::Pending).unwrap(),
            "\"pending\""
        );
    }
}
