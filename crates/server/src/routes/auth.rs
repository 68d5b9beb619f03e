//! Authentication route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::auth::set_current_user;
use crate::models::{Account, CurrentUser, Profile};
use crate::services::auth::{AuthService, RegisterRole};
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
    /// Requested role; defaults to `client`. Store owners start pending.
    #[serde(default)]
    pub role: RegisterRole,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for successful register/login.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub account: Account,
    pub profile: Profile,
}

/// Register a new identity and sign it in.
#[instrument(skip(state, session, request))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    let auth = AuthService::new(state.pool());
    let (account, profile) = auth
        .register(
            &request.email,
            &request.password,
            &request.display_name,
            request.role,
        )
        .await?;

    sign_in(&session, &account, &profile).await?;
    tracing::info!(profile_id = %profile.id, role = %profile.role, "profile registered");

    Ok((StatusCode::CREATED, Json(SessionResponse { account, profile })))
}

/// Sign in with email and password.
#[instrument(skip(state, session, request))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    let auth = AuthService::new(state.pool());
    let (account, profile) = auth.login(&request.email, &request.password).await?;

    // Fresh session ID before the new identity is stored
    session.cycle_id().await.map_err(internal_session_error)?;
    sign_in(&session, &account, &profile).await?;

    Ok(Json(SessionResponse { account, profile }))
}

/// Sign out: tears down the session entirely.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode> {
    session.flush().await.map_err(internal_session_error)?;
    clear_sentry_user();
    Ok(StatusCode::NO_CONTENT)
}

/// Store the identity in the session and tag the Sentry scope.
async fn sign_in(session: &Session, account: &Account, profile: &Profile) -> Result<()> {
    let user = CurrentUser {
        account_id: account.id,
        profile_id: profile.id,
        email: account.email.clone(),
    };
    set_current_user(session, &user)
        .await
        .map_err(internal_session_error)?;
    set_sentry_user(&profile.id, Some(account.email.as_str()));
    Ok(())
}

fn internal_session_error(e: tower_sessions::session::Error) -> AppError {
    AppError::Internal(format!("session store error: {e}"))
}

/// Create the auth routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}
