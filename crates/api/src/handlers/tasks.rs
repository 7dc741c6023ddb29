//! Handler for the care task list page.

use axum::extract::State;
use axum::Json;
use chrono::{NaiveDate, Utc};
use plantpal_core::care::{group_by_due_day, is_overdue, TaskType};
use plantpal_core::listing::ListingStatus;
use plantpal_core::samples::{sample_tasks, SampleTask};
use plantpal_core::types::Timestamp;
use plantpal_db::models::care_task::CareTaskWithPlant;
use plantpal_db::repositories::CareTaskRepo;
use serde::Serialize;

use crate::middleware::auth::CurrentUser;
use crate::response::PageResponse;
use crate::state::AppState;
use crate::views::{listing, NavShell, Sample};

/// How many completed tasks the "recently completed" list shows.
const RECENTLY_COMPLETED_LIMIT: i64 = 10;

/// An incomplete task as shown on the dashboard and task list.
#[derive(Debug, Serialize)]
pub struct UpcomingTask {
    #[serde(flatten)]
    pub task: CareTaskWithPlant,
    pub label: Option<&'static str>,
    pub overdue: bool,
    pub complete_action: String,
}

impl UpcomingTask {
    pub fn new(task: CareTaskWithPlant, now: Timestamp) -> Self {
        Self {
            label: task.task.kind().map(TaskType::label),
            overdue: is_overdue(task.task.due_date, now),
            complete_action: format!("/dashboard/tasks/{}/complete", task.task.id),
            task,
        }
    }
}

/// Incomplete tasks sharing a due day.
#[derive(Debug, Serialize)]
pub struct TaskDay {
    pub date: NaiveDate,
    pub tasks: Vec<UpcomingTask>,
}

#[derive(Debug, Serialize)]
pub struct TaskListView {
    pub status: ListingStatus,
    pub days: Vec<TaskDay>,
    /// Showcase tasks; only filled when nothing is scheduled.
    pub samples: Vec<Sample<SampleTask>>,
    pub message: Option<String>,
    pub recently_completed: Vec<CareTaskWithPlant>,
}

/// GET /dashboard/tasks
///
/// Incomplete tasks grouped by due day, soonest first, plus the most
/// recently completed ones.
pub async fn list_tasks(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Json<PageResponse<TaskListView>> {
    let now = Utc::now();

    let upcoming = listing(
        CareTaskRepo::list_upcoming_for_user(&state.pool, user.id(), None).await,
        "tasks",
    );
    let status = upcoming.status();
    let message = upcoming.message().map(str::to_string);
    let samples = if status == ListingStatus::Empty {
        Sample::wrap(sample_tasks(now))
    } else {
        Vec::new()
    };

    let days = group_by_due_day(upcoming.into_rows(), |t| t.task.due_date)
        .into_iter()
        .map(|(date, tasks)| TaskDay {
            date,
            tasks: tasks
                .into_iter()
                .map(|t| UpcomingTask::new(t, now))
                .collect(),
        })
        .collect();

    // A failure here only hides the secondary list.
    let recently_completed = CareTaskRepo::list_recently_completed_for_user(
        &state.pool,
        user.id(),
        RECENTLY_COMPLETED_LIMIT,
    )
    .await
    .unwrap_or_else(|e| {
        tracing::error!(error = %e, user_id = user.id(), "Failed to load completed tasks");
        Vec::new()
    });

    Json(PageResponse {
        nav: NavShell::for_user(&user),
        data: TaskListView {
            status,
            days,
            samples,
            message,
            recently_completed,
        },
    })
}
