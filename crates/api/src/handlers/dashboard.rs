//! Handler for the dashboard overview.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use plantpal_core::listing::ListingStatus;
use plantpal_core::profile::display_name;
use plantpal_core::samples::{
    sample_plants, sample_tasks, SamplePlant, SampleTask, DASHBOARD_SAMPLE_PLANTS,
    DASHBOARD_SAMPLE_TASKS,
};
use plantpal_db::models::plant::Plant;
use plantpal_db::repositories::{CareTaskRepo, PlantRepo};
use serde::Serialize;

use crate::handlers::tasks::UpcomingTask;
use crate::middleware::auth::CurrentUser;
use crate::response::PageResponse;
use crate::state::AppState;
use crate::views::{listing, NavShell, Sample};

/// Upcoming tasks shown on the dashboard.
const DASHBOARD_TASK_LIMIT: i64 = 5;

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub greeting_name: String,
    pub plants_status: ListingStatus,
    pub plants: Vec<Plant>,
    pub sample_plants: Vec<Sample<SamplePlant>>,
    pub tasks_status: ListingStatus,
    pub upcoming_tasks: Vec<UpcomingTask>,
    pub sample_tasks: Vec<Sample<SampleTask>>,
    /// Messages for sections that could not be loaded.
    pub messages: Vec<String>,
    pub add_plant_href: &'static str,
}

/// GET /dashboard
///
/// The user's plants and their next few incomplete tasks. Empty sections
/// are filled with sample records.
pub async fn dashboard(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Json<PageResponse<DashboardView>> {
    let now = Utc::now();

    let plants = listing(
        PlantRepo::list_for_user(&state.pool, user.id(), None).await,
        "plants",
    );
    let tasks = listing(
        CareTaskRepo::list_upcoming_for_user(&state.pool, user.id(), Some(DASHBOARD_TASK_LIMIT))
            .await,
        "upcoming tasks",
    );

    let messages: Vec<String> = [plants.message(), tasks.message()]
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect();

    let plants_status = plants.status();
    let sample_plants = if plants_status == ListingStatus::Empty {
        Sample::wrap(sample_plants().into_iter().take(DASHBOARD_SAMPLE_PLANTS))
    } else {
        Vec::new()
    };

    let tasks_status = tasks.status();
    let sample_tasks = if tasks_status == ListingStatus::Empty {
        Sample::wrap(sample_tasks(now).into_iter().take(DASHBOARD_SAMPLE_TASKS))
    } else {
        Vec::new()
    };

    let upcoming_tasks = tasks
        .into_rows()
        .into_iter()
        .map(|t| UpcomingTask::new(t, now))
        .collect();

    let profile = &user.profile;
    let view = DashboardView {
        greeting_name: display_name(profile.full_name.as_deref(), &profile.email),
        plants_status,
        plants: plants.into_rows(),
        sample_plants,
        tasks_status,
        upcoming_tasks,
        sample_tasks,
        messages,
        add_plant_href: "/dashboard/plants/add",
    };

    Json(PageResponse {
        nav: NavShell::for_user(&user),
        data: view,
    })
}
