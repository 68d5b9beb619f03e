//! Admin moderation handlers for profiles.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use tracing::instrument;

use vila_core::{ModerationAction, ProfileId};

use super::StatusQuery;
use crate::db::profiles::ProfileRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::Profile;
use crate::services::moderation::ModerationService;
use crate::state::AppState;

/// List profiles in a moderation queue (defaults to pending).
#[instrument(skip(state, _admin))]
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<Profile>>> {
    let profiles = ProfileRepository::new(state.pool())
        .list_by_status(query.status)
        .await?;
    Ok(Json(profiles))
}

/// Approve a pending profile.
#[instrument(skip(state, admin))]
pub async fn approve(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<ProfileId>,
) -> Result<Json<Profile>> {
    let profile = ModerationService::new(state.pool())
        .moderate_profile(id, ModerationAction::Approve)
        .await?;
    tracing::info!(profile_id = %id, admin_id = %admin.id, "profile approved");
    Ok(Json(profile))
}

/// Block (or suspend) a profile.
#[instrument(skip(state, admin))]
pub async fn block(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<ProfileId>,
) -> Result<Json<Profile>> {
    let profile = ModerationService::new(state.pool())
        .moderate_profile(id, ModerationAction::Block)
        .await?;
    tracing::info!(profile_id = %id, admin_id = %admin.id, "profile blocked");
    Ok(Json(profile))
}

/// Create the admin profile routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/{id}/approve", post(approve))
        .route("/{id}/block", post(block))
}
