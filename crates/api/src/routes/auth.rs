//! Public pages and the sign-in / sign-up / sign-out forms.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// ```text
/// GET  /          -> landing
/// GET  /sign-in   -> sign_in_page
/// POST /sign-in   -> sign_in
/// POST /sign-up   -> sign_up
/// POST /sign-out  -> sign_out (requires session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(auth::landing))
        .route("/sign-in", get(auth::sign_in_page).post(auth::sign_in))
        .route("/sign-up", post(auth::sign_up))
        .route("/sign-out", post(auth::sign_out))
}
