//! Public store directory route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use tracing::instrument;

use vila_core::StoreId;

use crate::db::products::ProductRepository;
use crate::db::stores::StoreRepository;
use crate::error::{AppError, Result};
use crate::middleware::OptionalAuth;
use crate::models::{Product, Store};
use crate::state::AppState;

/// List approved stores alphabetically.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Store>>> {
    let stores = StoreRepository::new(state.pool()).list_public().await?;
    Ok(Json(stores))
}

/// Show a single store.
///
/// Approved stores are public; a pending or blocked store is visible only
/// to its owner (so owners can see their submission) and 404s for everyone
/// else.
#[instrument(skip(state, auth))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(auth): OptionalAuth,
    Path(id): Path<StoreId>,
) -> Result<Json<Store>> {
    let store = StoreRepository::new(state.pool())
        .get(id)
        .await?
        .filter(|store| {
            store.status.is_public()
                || auth
                    .as_ref()
                    .is_some_and(|user| user.profile_id == store.owner_id)
        })
        .ok_or_else(|| AppError::NotFound(format!("store {id}")))?;
    Ok(Json(store))
}

/// List an approved store's products.
///
/// Products of pending or blocked stores are not publicly reachable.
#[instrument(skip(state))]
pub async fn products(
    State(state): State<AppState>,
    Path(id): Path<StoreId>,
) -> Result<Json<Vec<Product>>> {
    let store = StoreRepository::new(state.pool())
        .get_public(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("store {id}")))?;

    let products = ProductRepository::new(state.pool())
        .list_for_store(store.id)
        .await?;
    Ok(Json(products))
}

/// Create the public store routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/{id}", get(show))
        .route("/{id}/products", get(products))
}
