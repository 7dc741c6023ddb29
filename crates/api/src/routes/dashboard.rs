//! Routes mounted at `/dashboard`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{care_tasks, dashboard, growth_entries, plants, profile, tasks, uploads};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::dashboard))
        // Plants
        .route("/plants", get(plants::list_plants))
        .route(
            "/plants/add",
            get(plants::add_plant_form).post(plants::create_plant),
        )
        .route("/plants/{id}", get(plants::plant_detail))
        .route(
            "/plants/{id}/edit",
            get(plants::edit_plant_form).post(plants::update_plant),
        )
        .route("/plants/{id}/delete", post(plants::delete_plant))
        .route(
            "/plants/{id}/add-entry",
            get(growth_entries::add_entry_form).post(growth_entries::create_entry),
        )
        .route(
            "/plants/{id}/add-task",
            get(care_tasks::add_task_form).post(care_tasks::create_task),
        )
        // Tasks
        .route("/tasks", get(tasks::list_tasks))
        .route("/tasks/{id}/complete", post(care_tasks::complete_task))
        // Profile
        .route("/profile", get(profile::profile_page))
        .route(
            "/profile/edit",
            get(profile::edit_profile_form).post(profile::update_profile),
        )
        .route("/profile/avatar", post(profile::upload_avatar))
        // Uploads
        .route("/uploads/plant-image", post(uploads::upload_plant_image))
}
