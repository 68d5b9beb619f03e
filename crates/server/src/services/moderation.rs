//! Moderation service: the single write path for status transitions.
//!
//! Admin handlers never touch status columns directly. Every approve/block
//! goes through here so the policy in [`vila_core::ModerationStatus`] is
//! enforced exactly once, and the repositories' guarded UPDATEs (expected
//! status in the WHERE clause) ensure a concurrent decision cannot be
//! double-applied.

use sqlx::PgPool;

use vila_core::{
    ClassifiedId, ModerationAction, NewsId, ProfessionalId, ProfileId, StoreId, TransitionError,
};

use crate::db::RepositoryError;
use crate::db::classifieds::ClassifiedRepository;
use crate::db::news::NewsRepository;
use crate::db::professionals::ProfessionalRepository;
use crate::db::profiles::ProfileRepository;
use crate::db::stores::StoreRepository;
use crate::models::{Classified, NewsItem, Professional, Profile, Store};

/// Errors that can occur while applying a moderation decision.
#[derive(Debug, thiserror::Error)]
pub enum ModerationError {
    /// The record does not exist.
    #[error("record not found")]
    NotFound,

    /// The policy does not permit this transition.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// Another admin changed the record between read and write.
    #[error("record was modified concurrently")]
    Superseded,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Service applying admin moderation decisions.
pub struct ModerationService<'a> {
    pool: &'a PgPool,
}

impl<'a> ModerationService<'a> {
    /// Create a new moderation service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Apply a moderation action to a profile.
    ///
    /// # Errors
    ///
    /// Returns `ModerationError::NotFound` for unknown IDs, `Transition`
    /// when the policy forbids the action for the record's current status,
    /// and `Superseded` when a concurrent decision won the race.
    pub async fn moderate_profile(
        &self,
        id: ProfileId,
        action: ModerationAction,
    ) -> Result<Profile, ModerationError> {
        let repo = ProfileRepository::new(self.pool);
        let profile = repo.get(id).await?.ok_or(ModerationError::NotFound)?;

        let to = profile.status.transition(action)?;
        if !repo.set_status(id, profile.status, to).await? {
            return Err(ModerationError::Superseded);
        }
        tracing::info!(profile_id = %id, from = %profile.status, to = %to, "profile moderated");

        repo.get(id).await?.ok_or(ModerationError::NotFound)
    }

    /// Apply a moderation action to a store.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::moderate_profile`].
    pub async fn moderate_store(
        &self,
        id: StoreId,
        action: ModerationAction,
    ) -> Result<Store, ModerationError> {
        let repo = StoreRepository::new(self.pool);
        let store = repo.get(id).await?.ok_or(ModerationError::NotFound)?;

        let to = store.status.transition(action)?;
        if !repo.set_status(id, store.status, to).await? {
            return Err(ModerationError::Superseded);
        }
        tracing::info!(store_id = %id, from = %store.status, to = %to, "store moderated");

        repo.get(id).await?.ok_or(ModerationError::NotFound)
    }

    /// Apply a moderation action to a news article.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::moderate_profile`].
    pub async fn moderate_news(
        &self,
        id: NewsId,
        action: ModerationAction,
    ) -> Result<NewsItem, ModerationError> {
        let repo = NewsRepository::new(self.pool);
        let item = repo.get(id).await?.ok_or(ModerationError::NotFound)?;

        let to = item.status.transition(action)?;
        if !repo.set_status(id, item.status, to).await? {
            return Err(ModerationError::Superseded);
        }
        tracing::info!(news_id = %id, from = %item.status, to = %to, "news moderated");

        repo.get(id).await?.ok_or(ModerationError::NotFound)
    }

    /// Apply a moderation action to a classified ad.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::moderate_profile`].
    pub async fn moderate_classified(
        &self,
        id: ClassifiedId,
        action: ModerationAction,
    ) -> Result<Classified, ModerationError> {
        let repo = ClassifiedRepository::new(self.pool);
        let ad = repo.get(id).await?.ok_or(ModerationError::NotFound)?;

        let to = ad.status.transition(action)?;
        if !repo.set_status(id, ad.status, to).await? {
            return Err(ModerationError::Superseded);
        }
        tracing::info!(classified_id = %id, from = %ad.status, to = %to, "classified moderated");

        repo.get(id).await?.ok_or(ModerationError::NotFound)
    }

    /// Apply a moderation action to a professional listing.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::moderate_profile`].
    pub async fn moderate_professional(
        &self,
        id: ProfessionalId,
        action: ModerationAction,
    ) -> Result<Professional, ModerationError> {
        let repo = ProfessionalRepository::new(self.pool);
        let listing = repo.get(id).await?.ok_or(ModerationError::NotFound)?;

        let to = listing.status.transition(action)?;
        if !repo.set_status(id, listing.status, to).await? {
            return Err(ModerationError::Superseded);
        }
        tracing::info!(professional_id = %id, from = %listing.status, to = %to, "professional moderated");

        repo.get(id).await?.ok_or(ModerationError::NotFound)
    }
}
