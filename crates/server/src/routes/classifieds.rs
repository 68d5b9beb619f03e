//! Classified ads route handlers.
//!
//! Listing and detail are public; posting requires an active profile and
//! new ads start pending until an admin approves them.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use vila_core::{ClassifiedId, Price};

use crate::db::classifieds::ClassifiedRepository;
use crate::error::{AppError, Result};
use crate::middleware::CurrentProfile;
use crate::models::Classified;
use crate::state::AppState;

/// Request body for posting a classified ad.
#[derive(Debug, Deserialize)]
pub struct CreateClassifiedRequest {
    pub title: String,
    pub body: String,
    /// Optional asking price.
    pub price: Option<Price>,
}

/// List published ads, newest first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Classified>>> {
    let ads = ClassifiedRepository::new(state.pool()).list_public().await?;
    Ok(Json(ads))
}

/// Show a single published ad.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ClassifiedId>,
) -> Result<Json<Classified>> {
    let ad = ClassifiedRepository::new(state.pool())
        .get_public(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("classified {id}")))?;
    Ok(Json(ad))
}

/// Post a classified ad. Starts pending.
#[instrument(skip(state, profile, request))]
pub async fn create(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Json(request): Json<CreateClassifiedRequest>,
) -> Result<impl IntoResponse> {
    if !profile.is_active() {
        return Err(AppError::Forbidden(
            "profile must be active to post classifieds".to_owned(),
        ));
    }
    let title = request.title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("title is required".to_owned()));
    }
    if request.body.trim().is_empty() {
        return Err(AppError::BadRequest("body is required".to_owned()));
    }

    let ad = ClassifiedRepository::new(state.pool())
        .create(profile.id, title, request.body.trim(), request.price)
        .await?;
    tracing::info!(classified_id = %ad.id, created_by = %profile.id, "classified posted");

    Ok((StatusCode::CREATED, Json(ad)))
}

/// Create the classifieds routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create))
        .route("/{id}", get(show))
}
