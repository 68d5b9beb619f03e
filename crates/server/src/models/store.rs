//! Store and product domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use vila_core::{ModerationStatus, Price, ProductId, ProductImageId, ProfileId, StoreId};

/// A store listed in the portal directory (domain type).
///
/// Created by a store-owner profile, approved by an admin.
#[derive(Debug, Clone, Serialize)]
pub struct Store {
    /// Unique store ID.
    pub id: StoreId,
    /// Profile that owns this store.
    pub owner_id: ProfileId,
    /// Store display name.
    pub name: String,
    /// Street address shown in the directory.
    pub address: String,
    /// Moderation status; new stores start pending.
    pub status: ModerationStatus,
    /// When the store was created.
    pub created_at: DateTime<Utc>,
    /// When the store was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A product offered by a store (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Store this product belongs to.
    pub store_id: StoreId,
    /// Product title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Price with currency.
    pub price: Price,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Metadata for an uploaded product image (domain type).
///
/// The object itself lives under the media root; `path` is relative to it
/// and `public_url` is what clients dereference.
#[derive(Debug, Clone, Serialize)]
pub struct ProductImage {
    /// Unique image ID.
    pub id: ProductImageId,
    /// Product the image belongs to.
    pub product_id: ProductId,
    /// Store the product belongs to (denormalized for ownership checks).
    pub store_id: StoreId,
    /// Profile that uploaded the image.
    pub uploaded_by: ProfileId,
    /// Object path relative to the media root.
    pub path: String,
    /// MIME type recorded at upload time.
    pub content_type: String,
    /// Object size in bytes.
    pub size_bytes: i64,
    /// When the image was uploaded.
    pub created_at: DateTime<Utc>,
}

impl ProductImage {
    /// Public URL for this image, served under `/media`.
    #[must_use]
    pub fn public_url(&self) -> String {
        format!("/media/{}", self.path)
    }
}
