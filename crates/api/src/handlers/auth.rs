//! Handlers for the public pages and the sign-in / sign-up / sign-out forms.

use axum::extract::{Query, State};
use axum::http::header::{SET_COOKIE, USER_AGENT};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect};
use axum::{Form, Json};
use chrono::Utc;
use plantpal_core::error::CoreError;
use plantpal_core::plants::optional_text;
use plantpal_core::types::DbId;
use plantpal_db::models::session::CreateSession;
use plantpal_db::models::user::CreateUser;
use plantpal_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::cookie::{cleared_session_cookie, session_cookie};
use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult, SIGN_IN_PATH};
use crate::handlers::DASHBOARD_PATH;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Form / view types
// ---------------------------------------------------------------------------

/// Form body for `POST /sign-in`.
#[derive(Debug, Deserialize)]
pub struct SignInForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Form body for `POST /sign-up`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignUpForm {
    #[serde(default)]
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(
        min = MIN_PASSWORD_LENGTH,
        message = "Password must be at least 8 characters long"
    ))]
    pub password: String,
    pub full_name: Option<String>,
}

/// Optional notice shown above the sign-in form.
#[derive(Debug, Deserialize)]
pub struct SignInQuery {
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

/// View model of the public landing page.
#[derive(Debug, Serialize)]
pub struct LandingView {
    pub headline: &'static str,
    pub tagline: &'static str,
    pub features: [Feature; 6],
    pub sign_in_href: &'static str,
    pub sign_up_action: &'static str,
}

/// View model of the sign-in page.
#[derive(Debug, Serialize)]
pub struct SignInView {
    pub sign_in_action: &'static str,
    pub sign_up_action: &'static str,
    pub min_password_length: u64,
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /
pub async fn landing() -> Json<LandingView> {
    Json(LandingView {
        headline: "Your Personal Plant Care Companion",
        tagline: "Track growth, get care reminders, and watch your plants thrive \
                  with our AI-powered plant journal app.",
        features: [
            Feature {
                title: "AI Plant Recognition",
                description: "Instantly identify plants and get species-specific care advice",
            },
            Feature {
                title: "Smart Reminders",
                description: "Custom watering schedules based on plant type and season",
            },
            Feature {
                title: "Growth Timeline",
                description: "Track your plant's progress with visual photo journals",
            },
            Feature {
                title: "Health Diagnosis",
                description: "Identify and treat common plant diseases and pests",
            },
            Feature {
                title: "Light & Climate Tips",
                description: "Personalized advice based on your local conditions",
            },
            Feature {
                title: "Care History",
                description: "Log all your plant care activities in one place",
            },
        ],
        sign_in_href: "/sign-in",
        sign_up_action: "/sign-up",
    })
}

/// GET /sign-in
pub async fn sign_in_page(Query(query): Query<SignInQuery>) -> Json<SignInView> {
    Json(SignInView {
        sign_in_action: "/sign-in",
        sign_up_action: "/sign-up",
        min_password_length: MIN_PASSWORD_LENGTH,
        message: query.message,
    })
}

/// POST /sign-in
///
/// Verify credentials, open a session and set the session cookie. The
/// error never reveals whether the email is registered.
pub async fn sign_in(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(input): Form<SignInForm>,
) -> AppResult<impl IntoResponse> {
    let email = normalize_email(&input.email);

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    let cookie = start_session(&state, user.id, &headers).await?;
    tracing::info!(user_id = user.id, "User signed in");

    Ok(([(SET_COOKIE, cookie)], Redirect::to(DASHBOARD_PATH)))
}

/// POST /sign-up
///
/// Create the account and its profile row, then sign the new user in.
pub async fn sign_up(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(input): Form<SignUpForm>,
) -> AppResult<impl IntoResponse> {
    let email = normalize_email(&input.email);
    let input = SignUpForm { email, ..input };
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "An account with this email already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email,
            password_hash,
            full_name: optional_text(input.full_name),
        },
    )
    .await?;

    let cookie = start_session(&state, user.id, &headers).await?;
    tracing::info!(user_id = user.id, "User signed up");

    Ok(([(SET_COOKIE, cookie)], Redirect::to(DASHBOARD_PATH)))
}

/// POST /sign-out
///
/// Revoke the current session and clear the cookie.
pub async fn sign_out(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<impl IntoResponse> {
    SessionRepo::revoke(&state.pool, user.session_id).await?;
    tracing::info!(user_id = user.id(), session_id = user.session_id, "User signed out");

    Ok((
        [(SET_COOKIE, cleared_session_cookie(state.config.cookie_secure))],
        Redirect::to(SIGN_IN_PATH),
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Persist a session row, sign a token for it and build the `Set-Cookie` value.
async fn start_session(
    state: &AppState,
    user_id: DbId,
    headers: &HeaderMap,
) -> AppResult<String> {
    let jwt = &state.config.jwt;
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let session = SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id,
            expires_at: jwt.session_expires_at(Utc::now()),
            user_agent,
        },
    )
    .await?;

    let token = generate_access_token(user_id, session.id, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(session_cookie(
        &token,
        jwt.session_ttl_secs(),
        state.config.cookie_secure,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_up_form(password: &str) -> SignUpForm {
        SignUpForm {
            email: "ana@example.com".into(),
            password: password.into(),
            full_name: None,
        }
    }

    #[test]
    fn password_length_follows_minimum() {
        let min = MIN_PASSWORD_LENGTH as usize;
        assert!(sign_up_form(&"p".repeat(min - 1)).validate().is_err());
        assert!(sign_up_form(&"p".repeat(min)).validate().is_ok());
    }

    #[test]
    fn malformed_email_rejected() {
        let form = SignUpForm {
            email: "not-an-email".into(),
            ..sign_up_form("long-enough")
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn email_is_normalized() {
        assert_eq!(normalize_email("  Ana@Example.COM "), "ana@example.com");
    }
}
