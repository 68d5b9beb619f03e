//! Content record domain types: news, classifieds, professional listings.
//!
//! All three carry a creator reference and a moderation status; only
//! `active` records are publicly visible.

use chrono::{DateTime, Utc};
use serde::Serialize;

use vila_core::{ClassifiedId, ModerationStatus, NewsId, Price, ProfessionalId, ProfileId};

/// A news article published by the municipality.
#[derive(Debug, Clone, Serialize)]
pub struct NewsItem {
    /// Unique news ID.
    pub id: NewsId,
    /// Profile that authored the article (an admin).
    pub created_by: ProfileId,
    /// Headline.
    pub title: String,
    /// Article body (plain text).
    pub body: String,
    /// Moderation status.
    pub status: ModerationStatus,
    /// When the article was created.
    pub created_at: DateTime<Utc>,
    /// When the article was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A classified ad posted by a resident.
#[derive(Debug, Clone, Serialize)]
pub struct Classified {
    /// Unique classified ID.
    pub id: ClassifiedId,
    /// Profile that posted the ad.
    pub created_by: ProfileId,
    /// Ad title.
    pub title: String,
    /// Ad body.
    pub body: String,
    /// Optional asking price.
    pub price: Option<Price>,
    /// Moderation status; new ads start pending.
    pub status: ModerationStatus,
    /// When the ad was posted.
    pub created_at: DateTime<Utc>,
    /// When the ad was last updated.
    pub updated_at: DateTime<Utc>,
}

/// An entry in the professional directory.
#[derive(Debug, Clone, Serialize)]
pub struct Professional {
    /// Unique listing ID.
    pub id: ProfessionalId,
    /// Profile that registered the listing.
    pub created_by: ProfileId,
    /// Professional's name.
    pub name: String,
    /// Trade or profession (e.g., "electrician").
    pub profession: String,
    /// Optional contact phone.
    pub phone: Option<String>,
    /// Moderation status; new listings start pending.
    pub status: ModerationStatus,
    /// When the listing was created.
    pub created_at: DateTime<Utc>,
    /// When the listing was last updated.
    pub updated_at: DateTime<Utc>,
}
