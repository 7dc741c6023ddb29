//! Handlers for recording care activity and completing scheduled tasks.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};
use chrono::Utc;
use plantpal_core::care::{completed_now, parse_task_type, TaskType};
use plantpal_core::error::CoreError;
use plantpal_core::plants::optional_text;
use plantpal_core::types::DbId;
use plantpal_db::models::care_task::CreateCareTask;
use plantpal_db::repositories::{CareTaskRepo, PlantRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::plants::require_plant;
use crate::handlers::{plant_path, PLANTS_PATH, TASKS_PATH};
use crate::middleware::auth::CurrentUser;
use crate::response::PageResponse;
use crate::state::AppState;
use crate::views::NavShell;

/// Form body for `POST /dashboard/plants/{id}/add-task`.
///
/// A submitted `due_date` field is ignored: care logged through this form
/// is done at the moment of submission.
#[derive(Debug, Default, Deserialize)]
pub struct CareTaskForm {
    pub task_type: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TaskTypeOption {
    pub value: TaskType,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CareTaskFormView {
    pub plant_id: DbId,
    pub plant_name: String,
    pub action: String,
    pub cancel_href: String,
    pub task_types: Vec<TaskTypeOption>,
    pub default_task_type: TaskType,
}

/// GET /dashboard/plants/{id}/add-task
pub async fn add_task_form(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let Some(plant) = PlantRepo::find_for_user(&state.pool, id, user.id()).await? else {
        return Ok(Redirect::to(PLANTS_PATH).into_response());
    };

    let task_types = TaskType::ALL
        .into_iter()
        .map(|t| TaskTypeOption {
            value: t,
            label: t.label(),
        })
        .collect();

    Ok(Json(PageResponse {
        nav: NavShell::for_user(&user),
        data: CareTaskFormView {
            plant_id: plant.id,
            plant_name: plant.name,
            action: format!("{}/add-task", plant_path(id)),
            cancel_href: plant_path(id),
            task_types,
            default_task_type: TaskType::default(),
        },
    })
    .into_response())
}

/// POST /dashboard/plants/{id}/add-task
///
/// Records a completed care task: due and completion dates are both now.
/// Resubmitting records the activity again.
pub async fn create_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
    Form(form): Form<CareTaskForm>,
) -> AppResult<Redirect> {
    let task_type = parse_task_type(form.task_type.as_deref())?;
    require_plant(&state, id, user.id()).await?;

    let times = completed_now(Utc::now());
    let input = CreateCareTask {
        task_type,
        due_date: times.due_date,
        completed: true,
        completed_date: Some(times.completed_date),
        notes: optional_text(form.notes),
    };
    let task = CareTaskRepo::create(&state.pool, id, &input).await?;

    tracing::info!(
        user_id = user.id(),
        plant_id = id,
        task_id = task.id,
        task_type = %task_type,
        "Care task recorded"
    );
    Ok(Redirect::to(&plant_path(id)))
}

/// POST /dashboard/tasks/{id}/complete
///
/// Marks a scheduled task done. Completing a finished task is a no-op.
pub async fn complete_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Redirect> {
    let task = CareTaskRepo::complete(&state.pool, id, user.id())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CareTask",
            id,
        }))?;

    tracing::info!(
        user_id = user.id(),
        plant_id = task.plant_id,
        task_id = task.id,
        "Care task completed"
    );
    Ok(Redirect::to(TASKS_PATH))
}
