//! Public news route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use tracing::instrument;

use vila_core::NewsId;

use crate::db::news::NewsRepository;
use crate::error::{AppError, Result};
use crate::models::NewsItem;
use crate::state::AppState;

/// List published news, newest first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<NewsItem>>> {
    let items = NewsRepository::new(state.pool()).list_public().await?;
    Ok(Json(items))
}

/// Show a single published article.
///
/// Pending and blocked articles are indistinguishable from missing ones.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<NewsId>,
) -> Result<Json<NewsItem>> {
    let item = NewsRepository::new(state.pool())
        .get_public(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("news article {id}")))?;
    Ok(Json(item))
}

/// Create the news routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/{id}", get(show))
}
