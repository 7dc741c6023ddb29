//! Repository for the `plants` table.

use chrono::Utc;
use plantpal_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::plant::{CreatePlant, Plant, UpdatePlant};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, species, image_url, location, acquired_date, notes, \
                       created_at, updated_at";

/// Provides CRUD operations for plants. Every query is scoped to the owner.
pub struct PlantRepo;

impl PlantRepo {
    /// Insert a new plant owned by `user_id`, returning the created row.
    pub async fn create(
        pool: &SqlitePool,
        user_id: DbId,
        input: &CreatePlant,
    ) -> Result<Plant, sqlx::Error> {
        let query = format!(
            "INSERT INTO plants
                (user_id, name, species, image_url, location, acquired_date, notes,
                 created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Plant>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.species)
            .bind(&input.image_url)
            .bind(&input.location)
            .bind(input.acquired_date)
            .bind(&input.notes)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find a plant by ID, only if it belongs to `user_id`.
    pub async fn find_for_user(
        pool: &SqlitePool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Plant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM plants WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Plant>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's plants, newest first. `limit = None` returns all rows.
    pub async fn list_for_user(
        pool: &SqlitePool,
        user_id: DbId,
        limit: Option<i64>,
    ) -> Result<Vec<Plant>, sqlx::Error> {
        // SQLite treats a negative LIMIT as "no limit".
        let query = format!(
            "SELECT {COLUMNS} FROM plants
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Plant>(&query)
            .bind(user_id)
            .bind(limit.unwrap_or(-1))
            .fetch_all(pool)
            .await
    }

    /// Count a user's plants.
    pub async fn count_for_user(pool: &SqlitePool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM plants WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Overwrite every editable field and bump `updated_at`.
    ///
    /// Returns `None` if the plant does not exist or belongs to someone else.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        user_id: DbId,
        input: &UpdatePlant,
    ) -> Result<Option<Plant>, sqlx::Error> {
        let query = format!(
            "UPDATE plants SET
                name = $3,
                species = $4,
                image_url = $5,
                location = $6,
                acquired_date = $7,
                notes = $8,
                updated_at = $9
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Plant>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.species)
            .bind(&input.image_url)
            .bind(&input.location)
            .bind(input.acquired_date)
            .bind(&input.notes)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Delete a plant together with its growth entries and care tasks.
    ///
    /// All three deletes run in one transaction; either everything goes or
    /// nothing does. Returns `false` (and touches nothing) if the plant does
    /// not exist or belongs to someone else.
    pub async fn delete_cascade(
        pool: &SqlitePool,
        id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let owned: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM plants WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;
        if owned.is_none() {
            return Ok(false);
        }

        sqlx::query("DELETE FROM plant_entries WHERE plant_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM care_tasks WHERE plant_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM plants WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}
