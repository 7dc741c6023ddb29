//! Care task model and DTOs.

use plantpal_core::care::TaskType;
use plantpal_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `care_tasks` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CareTask {
    pub id: DbId,
    pub plant_id: DbId,
    pub task_type: String,
    pub due_date: Timestamp,
    pub completed: bool,
    pub completed_date: Option<Timestamp>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CareTask {
    /// The typed task kind; `None` only for rows written outside this service.
    pub fn kind(&self) -> Option<TaskType> {
        self.task_type.parse().ok()
    }
}

/// A care task joined with the name and photo of its plant.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CareTaskWithPlant {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub task: CareTask,
    pub plant_name: String,
    pub plant_image_url: Option<String>,
}

/// DTO for inserting a care task.
#[derive(Debug, Clone)]
pub struct CreateCareTask {
    pub task_type: TaskType,
    pub due_date: Timestamp,
    pub completed: bool,
    pub completed_date: Option<Timestamp>,
    pub notes: Option<String>,
}
