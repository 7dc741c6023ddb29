//! Repository for the `care_tasks` table.

use chrono::Utc;
use plantpal_core::care::TaskType;
use plantpal_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::care_task::{CareTask, CareTaskWithPlant, CreateCareTask};

const COLUMNS: &str = "id, plant_id, task_type, due_date, completed, completed_date, notes, \
                       created_at, updated_at";

/// Task columns qualified with the `t` alias plus the joined plant columns.
const JOINED_COLUMNS: &str = "t.id, t.plant_id, t.task_type, t.due_date, t.completed, \
                              t.completed_date, t.notes, t.created_at, t.updated_at, \
                              p.name AS plant_name, p.image_url AS plant_image_url";

/// Provides operations for care tasks.
pub struct CareTaskRepo;

impl CareTaskRepo {
    /// Insert a care task for a plant the caller has already verified.
    pub async fn create(
        pool: &SqlitePool,
        plant_id: DbId,
        input: &CreateCareTask,
    ) -> Result<CareTask, sqlx::Error> {
        let query = format!(
            "INSERT INTO care_tasks
                (plant_id, task_type, due_date, completed, completed_date, notes,
                 created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CareTask>(&query)
            .bind(plant_id)
            .bind(input.task_type.as_str())
            .bind(input.due_date)
            .bind(input.completed)
            .bind(input.completed_date)
            .bind(&input.notes)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Completed tasks for a plant, most recently completed first.
    pub async fn list_history_by_plant(
        pool: &SqlitePool,
        plant_id: DbId,
    ) -> Result<Vec<CareTask>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM care_tasks
             WHERE plant_id = $1 AND completed = 1
             ORDER BY completed_date DESC, id DESC"
        );
        sqlx::query_as::<_, CareTask>(&query)
            .bind(plant_id)
            .fetch_all(pool)
            .await
    }

    /// The most recent completed task of one type for a plant.
    pub async fn last_completed_of_type(
        pool: &SqlitePool,
        plant_id: DbId,
        task_type: TaskType,
    ) -> Result<Option<CareTask>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM care_tasks
             WHERE plant_id = $1 AND task_type = $2 AND completed = 1
             ORDER BY completed_date DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, CareTask>(&query)
            .bind(plant_id)
            .bind(task_type.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Incomplete tasks across all of a user's plants, soonest due first.
    pub async fn list_upcoming_for_user(
        pool: &SqlitePool,
        user_id: DbId,
        limit: Option<i64>,
    ) -> Result<Vec<CareTaskWithPlant>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM care_tasks t
             JOIN plants p ON p.id = t.plant_id
             WHERE p.user_id = $1 AND t.completed = 0
             ORDER BY t.due_date ASC, t.id ASC
             LIMIT $2"
        );
        sqlx::query_as::<_, CareTaskWithPlant>(&query)
            .bind(user_id)
            .bind(limit.unwrap_or(-1))
            .fetch_all(pool)
            .await
    }

    /// Completed tasks across all of a user's plants, newest first.
    pub async fn list_recently_completed_for_user(
        pool: &SqlitePool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<CareTaskWithPlant>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM care_tasks t
             JOIN plants p ON p.id = t.plant_id
             WHERE p.user_id = $1 AND t.completed = 1
             ORDER BY t.completed_date DESC, t.id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, CareTaskWithPlant>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Mark a task complete now, if it belongs to one of the user's plants.
    ///
    /// Completing an already-completed task keeps its original completion date.
    pub async fn complete(
        pool: &SqlitePool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<CareTask>, sqlx::Error> {
        let query = format!(
            "UPDATE care_tasks SET
                completed = 1,
                completed_date = COALESCE(completed_date, $3),
                updated_at = $3
             WHERE id = $1
               AND plant_id IN (SELECT id FROM plants WHERE user_id = $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CareTask>(&query)
            .bind(id)
            .bind(user_id)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Count a user's completed tasks of one type.
    pub async fn count_completed_by_type_for_user(
        pool: &SqlitePool,
        user_id: DbId,
        task_type: TaskType,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*)
             FROM care_tasks t
             JOIN plants p ON p.id = t.plant_id
             WHERE p.user_id = $1 AND t.task_type = $2 AND t.completed = 1",
        )
        .bind(user_id)
        .bind(task_type.as_str())
        .fetch_one(pool)
        .await
    }
}
