pub mod auth;
pub mod care_tasks;
pub mod dashboard;
pub mod growth_entries;
pub mod plants;
pub mod profile;
pub mod tasks;
pub mod uploads;

use plantpal_core::types::DbId;

/// Landing page of a signed-in user.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Plant list page; also where a missing plant's pages fall back to.
pub const PLANTS_PATH: &str = "/dashboard/plants";

pub const TASKS_PATH: &str = "/dashboard/tasks";

pub const PROFILE_PATH: &str = "/dashboard/profile";

/// Detail page of one plant.
pub fn plant_path(id: DbId) -> String {
    format!("{PLANTS_PATH}/{id}")
}
