//! Admin dashboard route handlers.
//!
//! Every handler takes the [`RequireAdmin`] extractor, so the whole subtree
//! is behind the authorization gate: 401 unauthenticated, 403 for any
//! non-admin role, with the role checked against the live profile row.

pub mod content;
pub mod profiles;
pub mod stores;

use axum::{Json, Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use vila_core::ModerationStatus;

use crate::db::classifieds::ClassifiedRepository;
use crate::db::news::NewsRepository;
use crate::db::professionals::ProfessionalRepository;
use crate::db::profiles::ProfileRepository;
use crate::db::stores::StoreRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Query string for moderation queue listings. Defaults to pending.
#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    #[serde(default)]
    pub status: ModerationStatus,
}

/// Pending work counts shown on the dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardCounts {
    pub profiles: i64,
    pub stores: i64,
    pub news: i64,
    pub classifieds: i64,
    pub professionals: i64,
}

/// Show pending moderation counts per entity.
#[instrument(skip(state, _admin))]
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<DashboardCounts>> {
    let pool = state.pool();
    let pending = ModerationStatus::Pending;

    let counts = DashboardCounts {
        profiles: ProfileRepository::new(pool).count_by_status(pending).await?,
        stores: StoreRepository::new(pool).count_by_status(pending).await?,
        news: NewsRepository::new(pool).count_by_status(pending).await?,
        classifieds: ClassifiedRepository::new(pool)
            .count_by_status(pending)
            .await?,
        professionals: ProfessionalRepository::new(pool)
            .count_by_status(pending)
            .await?,
    };

    Ok(Json(counts))
}

/// Create the admin routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .nest("/profiles", profiles::router())
        .nest("/stores", stores::router())
        .merge(content::router())
}
