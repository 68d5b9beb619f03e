//! Authentication middleware and extractors.
//!
//! The session stores only the identity ([`CurrentUser`]); extractors that
//! need role or status re-fetch the profile from the database on every
//! request. A moderation decision therefore takes effect on the victim's
//! very next request, and a session can never satisfy the admin gate with
//! stale role data.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tower_sessions::Session;

use vila_core::{ModerationStatus, grants_admin};

use crate::db::profiles::ProfileRepository;
use crate::error::AppError;
use crate::models::{CurrentUser, Profile, session_keys};
use crate::state::AppState;

/// Extractor that requires a signed-in identity.
///
/// Reads the session only; use [`CurrentProfile`] when the handler needs
/// role or status.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or_else(|| AppError::Unauthorized("not signed in".to_owned()))?;

        let user: CurrentUser = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| AppError::Unauthorized("not signed in".to_owned()))?;

        Ok(Self(user))
    }
}

/// Extractor that optionally gets the signed-in identity.
///
/// Unlike `RequireAuth`, this does not reject the request when nobody is
/// signed in.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentUser>(session_keys::CURRENT_USER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(user))
    }
}

/// Extractor that loads the signed-in identity's profile, freshly fetched.
///
/// The fetch is keyed by the profile ID read from the session at the start
/// of this request, so each request observes exactly one consistent
/// profile. Blocked profiles are rejected here, not in individual handlers.
pub struct CurrentProfile(pub Profile);

impl<S> FromRequestParts<S> for CurrentProfile
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuth(user) = RequireAuth::from_request_parts(parts, state).await?;
        let app_state = AppState::from_ref(state);

        let profile = ProfileRepository::new(app_state.pool())
            .get(user.profile_id)
            .await
            .map_err(AppError::Database)?
            // The profile row is gone: the session identity is stale.
            .ok_or_else(|| AppError::Unauthorized("profile no longer exists".to_owned()))?;

        if profile.status == ModerationStatus::Blocked {
            return Err(AppError::Forbidden("this account has been blocked".to_owned()));
        }

        Ok(Self(profile))
    }
}

/// Extractor that requires the admin role: the authorization gate.
///
/// Fails closed: no session, no profile, or any role other than `admin`
/// means no access. The role check always runs against the profile row as
/// it exists right now, never a session snapshot.
///
/// # Example
///
/// ```rust,ignore
/// async fn admin_handler(RequireAdmin(admin): RequireAdmin) -> impl IntoResponse {
///     format!("Hello, {}!", admin.display_name)
/// }
/// ```
pub struct RequireAdmin(pub Profile);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentProfile(profile) = CurrentProfile::from_request_parts(parts, state).await?;

        if !grants_admin(Some(profile.role)) {
            return Err(AppError::Forbidden(
                "admin role required for this resource".to_owned(),
            ));
        }

        if profile.status != ModerationStatus::Active {
            return Err(AppError::Forbidden(
                "admin profile is not active".to_owned(),
            ));
        }

        Ok(Self(profile))
    }
}

/// Helper to set the current user in the session after login/registration.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[tokio::test]
    async fn test_require_auth_rejects_without_session() {
        let request = Request::builder().uri("/account/profile").body(()).unwrap();
        let (mut parts, ()) = request.into_parts();

        let result = RequireAuth::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_optional_auth_is_none_without_session() {
        let request = Request::builder().uri("/news").body(()).unwrap();
        let (mut parts, ()) = request.into_parts();

        let OptionalAuth(user) = OptionalAuth::from_request_parts(&mut parts, &())
            .await
            .expect("optional auth is infallible");
        assert!(user.is_none());
    }
}
