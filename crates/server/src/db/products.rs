//! Product and product image repository for database operations.
//!
//! Products are always accessed through their store; every write is scoped
//! by `store_id` so ownership checks done at the route layer cannot be
//! bypassed by guessing IDs.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use vila_core::{CurrencyCode, Price, ProductId, ProductImageId, ProfileId, StoreId};

use super::RepositoryError;
use crate::models::{Product, ProductImage};

/// Internal row type for `PostgreSQL` product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    store_id: i32,
    title: String,
    description: Option<String>,
    price_amount: Decimal,
    price_currency: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let currency: CurrencyCode = row.price_currency.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid currency in database: {e}"))
        })?;

        Ok(Self {
            id: ProductId::new(row.id),
            store_id: StoreId::new(row.store_id),
            title: row.title,
            description: row.description,
            price: Price::new(row.price_amount, currency),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Internal row type for `PostgreSQL` product image queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductImageRow {
    id: i32,
    product_id: i32,
    store_id: i32,
    uploaded_by: i32,
    path: String,
    content_type: String,
    size_bytes: i64,
    created_at: DateTime<Utc>,
}

impl From<ProductImageRow> for ProductImage {
    fn from(row: ProductImageRow) -> Self {
        Self {
            id: ProductImageId::new(row.id),
            product_id: ProductId::new(row.product_id),
            store_id: StoreId::new(row.store_id),
            uploaded_by: ProfileId::new(row.uploaded_by),
            path: row.path,
            content_type: row.content_type,
            size_bytes: row.size_bytes,
            created_at: row.created_at,
        }
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a product in a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        store_id: StoreId,
        title: &str,
        description: Option<&str>,
        price: Price,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO portal.product (store_id, title, description, price_amount, price_currency)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, store_id, title, description, price_amount, price_currency,
                      created_at, updated_at
            ",
        )
        .bind(store_id)
        .bind(title)
        .bind(description)
        .bind(price.amount)
        .bind(price.currency.code())
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Get a product by ID, scoped to a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_in_store(
        &self,
        id: ProductId,
        store_id: StoreId,
    ) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, store_id, title, description, price_amount, price_currency,
                   created_at, updated_at
            FROM portal.product
            WHERE id = $1 AND store_id = $2
            ",
        )
        .bind(id)
        .bind(store_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List a store's products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_store(&self, store_id: StoreId) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, store_id, title, description, price_amount, price_currency,
                   created_at, updated_at
            FROM portal.product
            WHERE store_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Update a product, scoped to its store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist in
    /// this store.
    pub async fn update(
        &self,
        id: ProductId,
        store_id: StoreId,
        title: &str,
        description: Option<&str>,
        price: Price,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            UPDATE portal.product
            SET title = $3, description = $4, price_amount = $5, price_currency = $6,
                updated_at = now()
            WHERE id = $1 AND store_id = $2
            RETURNING id, store_id, title, description, price_amount, price_currency,
                      created_at, updated_at
            ",
        )
        .bind(id)
        .bind(store_id)
        .bind(title)
        .bind(description)
        .bind(price.amount)
        .bind(price.currency.code())
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Delete a product, scoped to its store.
    ///
    /// Returns `true` if the product was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ProductId, store_id: StoreId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM portal.product
            WHERE id = $1 AND store_id = $2
            ",
        )
        .bind(id)
        .bind(store_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Record upload metadata for a product image.
    ///
    /// Exactly one row per stored object; the caller is responsible for
    /// removing the object if this insert fails.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn insert_image(
        &self,
        product_id: ProductId,
        store_id: StoreId,
        uploaded_by: ProfileId,
        path: &str,
        content_type: &str,
        size_bytes: i64,
    ) -> Result<ProductImage, RepositoryError> {
        let row = sqlx::query_as::<_, ProductImageRow>(
            r"
            INSERT INTO portal.product_image
                (product_id, store_id, uploaded_by, path, content_type, size_bytes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, product_id, store_id, uploaded_by, path, content_type,
                      size_bytes, created_at
            ",
        )
        .bind(product_id)
        .bind(store_id)
        .bind(uploaded_by)
        .bind(path)
        .bind(content_type)
        .bind(size_bytes)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// List the images recorded for a product, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_images(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<ProductImage>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductImageRow>(
            r"
            SELECT id, product_id, store_id, uploaded_by, path, content_type,
                   size_bytes, created_at
            FROM portal.product_image
            WHERE product_id = $1
            ORDER BY created_at ASC
            ",
        )
        .bind(product_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
