//! Application services.
//!
//! Services sit between route handlers and repositories: they own the
//! business rules (credential checks, moderation policy, object storage)
//! while repositories own SQL.

pub mod auth;
pub mod media;
pub mod moderation;
