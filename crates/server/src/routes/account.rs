//! Account self-service route handlers.
//!
//! Everything under `/account` requires a signed-in identity; the profile
//! is re-fetched from the database per request by the extractor. Store and
//! product management additionally checks ownership, and an unowned store
//! is indistinguishable from a missing one.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use serde::Deserialize;
use tracing::instrument;

use vila_core::{Price, ProductId, ProfileRole, StoreId};

use crate::db::products::ProductRepository;
use crate::db::profiles::ProfileRepository;
use crate::db::stores::StoreRepository;
use crate::error::{AppError, Result};
use crate::middleware::CurrentProfile;
use crate::models::{Product, Profile, Store};
use crate::routes::uploads;
use crate::state::AppState;

/// Request body for self-editing the profile contact fields.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: String,
    pub phone: Option<String>,
}

/// Request body for creating or updating a store.
#[derive(Debug, Deserialize)]
pub struct StoreRequest {
    pub name: String,
    pub address: String,
}

/// Request body for creating or updating a product.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub title: String,
    pub description: Option<String>,
    pub price: Price,
}

// =============================================================================
// Profile
// =============================================================================

/// Show the signed-in identity's profile.
#[instrument(skip(profile))]
pub async fn profile(CurrentProfile(profile): CurrentProfile) -> Json<Profile> {
    Json(profile)
}

/// Self-edit the profile contact fields.
///
/// Role and status are admin-controlled and cannot be changed here.
#[instrument(skip(state, profile, request))]
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<Profile>> {
    let display_name = request.display_name.trim();
    if display_name.is_empty() {
        return Err(AppError::BadRequest("display name is required".to_owned()));
    }

    let updated = ProfileRepository::new(state.pool())
        .update_contact(profile.id, display_name, request.phone.as_deref())
        .await?;
    Ok(Json(updated))
}

// =============================================================================
// Stores
// =============================================================================

/// List the signed-in identity's stores (any status).
#[instrument(skip(state, profile))]
pub async fn my_stores(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
) -> Result<Json<Vec<Store>>> {
    let stores = StoreRepository::new(state.pool())
        .list_by_owner(profile.id)
        .await?;
    Ok(Json(stores))
}

/// Create a store. Requires an approved store-owner profile; new stores
/// start pending.
#[instrument(skip(state, profile, request))]
pub async fn create_store(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Json(request): Json<StoreRequest>,
) -> Result<impl IntoResponse> {
    if profile.role != ProfileRole::StoreOwner {
        return Err(AppError::Forbidden(
            "a store-owner profile is required to create a store".to_owned(),
        ));
    }
    if !profile.is_active() {
        return Err(AppError::Forbidden(
            "profile must be approved before creating a store".to_owned(),
        ));
    }
    let (name, address) = validate_store_fields(&request)?;

    let store = StoreRepository::new(state.pool())
        .create(profile.id, name, address)
        .await?;
    tracing::info!(store_id = %store.id, owner_id = %profile.id, "store created");

    Ok((StatusCode::CREATED, Json(store)))
}

/// Update an owned store's details.
#[instrument(skip(state, profile, request))]
pub async fn update_store(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path(store_id): Path<StoreId>,
    Json(request): Json<StoreRequest>,
) -> Result<Json<Store>> {
    let (name, address) = validate_store_fields(&request)?;

    let store = StoreRepository::new(state.pool())
        .update_details(store_id, profile.id, name, address)
        .await?;
    Ok(Json(store))
}

// =============================================================================
// Products
// =============================================================================

/// List an owned store's products.
#[instrument(skip(state, profile))]
pub async fn list_products(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path(store_id): Path<StoreId>,
) -> Result<Json<Vec<Product>>> {
    let store = owned_store(&state, &profile, store_id).await?;
    let products = ProductRepository::new(state.pool())
        .list_for_store(store.id)
        .await?;
    Ok(Json(products))
}

/// Create a product in an owned store.
#[instrument(skip(state, profile, request))]
pub async fn create_product(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path(store_id): Path<StoreId>,
    Json(request): Json<ProductRequest>,
) -> Result<impl IntoResponse> {
    let store = owned_store(&state, &profile, store_id).await?;
    let title = validate_product_fields(&request)?;

    let product = ProductRepository::new(state.pool())
        .create(store.id, title, request.description.as_deref(), request.price)
        .await?;
    tracing::info!(product_id = %product.id, store_id = %store.id, "product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product in an owned store.
#[instrument(skip(state, profile, request))]
pub async fn update_product(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path((store_id, product_id)): Path<(StoreId, ProductId)>,
    Json(request): Json<ProductRequest>,
) -> Result<Json<Product>> {
    let store = owned_store(&state, &profile, store_id).await?;
    let title = validate_product_fields(&request)?;

    let product = ProductRepository::new(state.pool())
        .update(
            product_id,
            store.id,
            title,
            request.description.as_deref(),
            request.price,
        )
        .await?;
    Ok(Json(product))
}

/// Delete a product from an owned store.
#[instrument(skip(state, profile))]
pub async fn delete_product(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path((store_id, product_id)): Path<(StoreId, ProductId)>,
) -> Result<StatusCode> {
    let store = owned_store(&state, &profile, store_id).await?;

    let deleted = ProductRepository::new(state.pool())
        .delete(product_id, store.id)
        .await?;
    if !deleted {
        return Err(AppError::NotFound(format!("product {product_id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Helpers
// =============================================================================

/// Load a store and verify the profile owns it.
///
/// Returns `NotFound` for both missing and unowned stores so that store IDs
/// cannot be probed.
pub(crate) async fn owned_store(
    state: &AppState,
    profile: &Profile,
    store_id: StoreId,
) -> Result<Store> {
    let store = StoreRepository::new(state.pool())
        .get(store_id)
        .await?
        .filter(|s| s.owner_id == profile.id)
        .ok_or_else(|| AppError::NotFound(format!("store {store_id}")))?;
    Ok(store)
}

fn validate_store_fields(request: &StoreRequest) -> Result<(&str, &str)> {
    let name = request.name.trim();
    let address = request.address.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("store name is required".to_owned()));
    }
    if address.is_empty() {
        return Err(AppError::BadRequest("store address is required".to_owned()));
    }
    Ok((name, address))
}

fn validate_product_fields(request: &ProductRequest) -> Result<&str> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("product title is required".to_owned()));
    }
    if request.price.amount.is_sign_negative() {
        return Err(AppError::BadRequest(
            "product price cannot be negative".to_owned(),
        ));
    }
    Ok(title)
}

/// Create the account routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(profile).put(update_profile))
        .route("/stores", get(my_stores).post(create_store))
        .route("/stores/{id}", put(update_store))
        .route(
            "/stores/{id}/products",
            get(list_products).post(create_product),
        )
        .route(
            "/stores/{id}/products/{pid}",
            put(update_product).delete(delete_product),
        )
        .route(
            "/stores/{id}/products/{pid}/images",
            get(uploads::list_images).post(uploads::upload_image),
        )
}
