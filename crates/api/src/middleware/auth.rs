//! Session-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use plantpal_core::types::DbId;
use plantpal_db::models::user::UserProfile;
use plantpal_db::repositories::{SessionRepo, UserRepo};

use crate::auth::cookie::session_token;
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The signed-in user, resolved once per request.
///
/// The token is read from the session cookie, or from an
/// `Authorization: Bearer` header for non-browser clients. It must verify,
/// name an active session row, and belong to an existing user; otherwise
/// extraction fails with [`AppError::SignInRequired`] (a redirect to the
/// sign-in page).
///
/// ```ignore
/// async fn my_page(user: CurrentUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.id(), "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// The session this request was authenticated with.
    pub session_id: DbId,
    /// Profile row loaded for the navigation shell and page headers.
    pub profile: UserProfile,
}

impl CurrentUser {
    pub fn id(&self) -> DbId {
        self.profile.id
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = request_token(parts).ok_or(AppError::SignInRequired)?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            AppError::SignInRequired
        })?;

        let session = SessionRepo::find_active(&state.pool, claims.sid)
            .await?
            .filter(|s| s.user_id == claims.sub)
            .ok_or_else(|| {
                tracing::debug!(session_id = claims.sid, "Session inactive");
                AppError::SignInRequired
            })?;

        let user = UserRepo::find_by_id(&state.pool, session.user_id)
            .await?
            .ok_or(AppError::SignInRequired)?;

        Ok(CurrentUser {
            session_id: session.id,
            profile: user.into(),
        })
    }
}

/// Token from the session cookie, falling back to a Bearer header.
fn request_token(parts: &Parts) -> Option<&str> {
    session_token(&parts.headers).or_else(|| {
        parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
    })
}
