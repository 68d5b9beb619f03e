//! Admin moderation handlers for stores.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use tracing::instrument;

use vila_core::{ModerationAction, StoreId};

use super::StatusQuery;
use crate::db::stores::StoreRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::Store;
use crate::services::moderation::ModerationService;
use crate::state::AppState;

/// List stores in a moderation queue (defaults to pending).
#[instrument(skip(state, _admin))]
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<Store>>> {
    let stores = StoreRepository::new(state.pool())
        .list_by_status(query.status)
        .await?;
    Ok(Json(stores))
}

/// Approve a pending store.
#[instrument(skip(state, admin))]
pub async fn approve(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<StoreId>,
) -> Result<Json<Store>> {
    let store = ModerationService::new(state.pool())
        .moderate_store(id, ModerationAction::Approve)
        .await?;
    tracing::info!(store_id = %id, admin_id = %admin.id, "store approved");
    Ok(Json(store))
}

/// Block (or suspend) a store.
#[instrument(skip(state, admin))]
pub async fn block(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<StoreId>,
) -> Result<Json<Store>> {
    let store = ModerationService::new(state.pool())
        .moderate_store(id, ModerationAction::Block)
        .await?;
    tracing::info!(store_id = %id, admin_id = %admin.id, "store blocked");
    Ok(Json(store))
}

/// Create the admin store routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/{id}/approve", post(approve))
        .route("/{id}/block", post(block))
}
