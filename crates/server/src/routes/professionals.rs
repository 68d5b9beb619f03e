//! Professional directory route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use vila_core::ProfessionalId;

use crate::db::professionals::ProfessionalRepository;
use crate::error::{AppError, Result};
use crate::middleware::CurrentProfile;
use crate::models::Professional;
use crate::state::AppState;

/// Request body for registering a directory entry.
#[derive(Debug, Deserialize)]
pub struct CreateProfessionalRequest {
    pub name: String,
    pub profession: String,
    pub phone: Option<String>,
}

/// List the published directory, grouped by profession.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Professional>>> {
    let listings = ProfessionalRepository::new(state.pool())
        .list_public()
        .await?;
    Ok(Json(listings))
}

/// Show a single published directory entry.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProfessionalId>,
) -> Result<Json<Professional>> {
    let listing = ProfessionalRepository::new(state.pool())
        .get_public(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("professional listing {id}")))?;
    Ok(Json(listing))
}

/// Register a directory entry. Starts pending.
#[instrument(skip(state, profile, request))]
pub async fn create(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Json(request): Json<CreateProfessionalRequest>,
) -> Result<impl IntoResponse> {
    if !profile.is_active() {
        return Err(AppError::Forbidden(
            "profile must be active to register a listing".to_owned(),
        ));
    }
    let name = request.name.trim();
    let profession = request.profession.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".to_owned()));
    }
    if profession.is_empty() {
        return Err(AppError::BadRequest("profession is required".to_owned()));
    }

    let listing = ProfessionalRepository::new(state.pool())
        .create(profile.id, name, profession, request.phone.as_deref())
        .await?;
    tracing::info!(professional_id = %listing.id, created_by = %profile.id, "listing registered");

    Ok((StatusCode::CREATED, Json(listing)))
}

/// Create the professionals routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create))
        .route("/{id}", get(show))
}
