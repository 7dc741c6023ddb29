pub mod auth;
pub mod dashboard;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the page and form route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                           landing (public)
/// /sign-in                                    form, sign in (public)
/// /sign-up                                    sign up (public)
/// /sign-out                                   sign out
///
/// /dashboard                                  overview
/// /dashboard/plants                           plant list
/// /dashboard/plants/add                       form, create
/// /dashboard/plants/{id}                      detail
/// /dashboard/plants/{id}/edit                 form, update
/// /dashboard/plants/{id}/delete               cascade delete
/// /dashboard/plants/{id}/add-entry            form, record growth entry
/// /dashboard/plants/{id}/add-task             form, record care task
/// /dashboard/tasks                            task list
/// /dashboard/tasks/{id}/complete              mark complete
/// /dashboard/profile                          profile
/// /dashboard/profile/edit                     form, update
/// /dashboard/profile/avatar                   avatar upload
/// /dashboard/uploads/plant-image              plant photo upload
/// ```
///
/// Every `/dashboard` route requires a session; without one the request is
/// redirected to `/sign-in`.
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/dashboard", dashboard::router())
}
