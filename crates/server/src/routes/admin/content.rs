//! Admin moderation handlers for content records.
//!
//! Covers news, classifieds and professional listings. News is special:
//! admins author it themselves, and admin-authored articles go live
//! immediately.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use vila_core::{ClassifiedId, ModerationAction, ModerationStatus, NewsId, ProfessionalId};

use super::StatusQuery;
use crate::db::classifieds::ClassifiedRepository;
use crate::db::news::NewsRepository;
use crate::db::professionals::ProfessionalRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{Classified, NewsItem, Professional};
use crate::services::moderation::ModerationService;
use crate::state::AppState;

/// Request body for publishing a news article.
#[derive(Debug, Deserialize)]
pub struct CreateNewsRequest {
    pub title: String,
    pub body: String,
}

// =============================================================================
// News
// =============================================================================

/// List news in a moderation queue (defaults to pending).
#[instrument(skip(state, _admin))]
pub async fn list_news(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<NewsItem>>> {
    let items = NewsRepository::new(state.pool())
        .list_by_status(query.status)
        .await?;
    Ok(Json(items))
}

/// Publish a news article. Admin-authored news is created active.
#[instrument(skip(state, admin, request))]
pub async fn create_news(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(request): Json<CreateNewsRequest>,
) -> Result<impl IntoResponse> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("title is required".to_owned()));
    }
    if request.body.trim().is_empty() {
        return Err(AppError::BadRequest("body is required".to_owned()));
    }

    let item = NewsRepository::new(state.pool())
        .create(admin.id, title, request.body.trim(), ModerationStatus::Active)
        .await?;
    tracing::info!(news_id = %item.id, admin_id = %admin.id, "news published");

    Ok((StatusCode::CREATED, Json(item)))
}

/// Approve a pending news article.
#[instrument(skip(state, _admin))]
pub async fn approve_news(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<NewsId>,
) -> Result<Json<NewsItem>> {
    let item = ModerationService::new(state.pool())
        .moderate_news(id, ModerationAction::Approve)
        .await?;
    Ok(Json(item))
}

/// Block a news article.
#[instrument(skip(state, _admin))]
pub async fn block_news(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<NewsId>,
) -> Result<Json<NewsItem>> {
    let item = ModerationService::new(state.pool())
        .moderate_news(id, ModerationAction::Block)
        .await?;
    Ok(Json(item))
}

// =============================================================================
// Classifieds
// =============================================================================

/// List classifieds in a moderation queue (defaults to pending).
#[instrument(skip(state, _admin))]
pub async fn list_classifieds(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<Classified>>> {
    let ads = ClassifiedRepository::new(state.pool())
        .list_by_status(query.status)
        .await?;
    Ok(Json(ads))
}

/// Approve a pending classified ad.
#[instrument(skip(state, _admin))]
pub async fn approve_classified(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<ClassifiedId>,
) -> Result<Json<Classified>> {
    let ad = ModerationService::new(state.pool())
        .moderate_classified(id, ModerationAction::Approve)
        .await?;
    Ok(Json(ad))
}

/// Block a classified ad.
#[instrument(skip(state, _admin))]
pub async fn block_classified(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<ClassifiedId>,
) -> Result<Json<Classified>> {
    let ad = ModerationService::new(state.pool())
        .moderate_classified(id, ModerationAction::Block)
        .await?;
    Ok(Json(ad))
}

// =============================================================================
// Professionals
// =============================================================================

/// List professional listings in a moderation queue (defaults to pending).
#[instrument(skip(state, _admin))]
pub async fn list_professionals(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<Professional>>> {
    let listings = ProfessionalRepository::new(state.pool())
        .list_by_status(query.status)
        .await?;
    Ok(Json(listings))
}

/// Approve a pending professional listing.
#[instrument(skip(state, _admin))]
pub async fn approve_professional(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<ProfessionalId>,
) -> Result<Json<Professional>> {
    let listing = ModerationService::new(state.pool())
        .moderate_professional(id, ModerationAction::Approve)
        .await?;
    Ok(Json(listing))
}

/// Block a professional listing.
#[instrument(skip(state, _admin))]
pub async fn block_professional(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<ProfessionalId>,
) -> Result<Json<Professional>> {
    let listing = ModerationService::new(state.pool())
        .moderate_professional(id, ModerationAction::Block)
        .await?;
    Ok(Json(listing))
}

/// Create the admin content routes router (news, classifieds, professionals).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/news", get(list_news).post(create_news))
        .route("/news/{id}/approve", post(approve_news))
        .route("/news/{id}/block", post(block_news))
        .route("/classifieds", get(list_classifieds))
        .route("/classifieds/{id}/approve", post(approve_classified))
        .route("/classifieds/{id}/block", post(block_classified))
        .route("/professionals", get(list_professionals))
        .route("/professionals/{id}/approve", post(approve_professional))
        .route("/professionals/{id}/block", post(block_professional))
}
