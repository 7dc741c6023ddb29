//! Repository for the `plant_entries` table.

use chrono::Utc;
use plantpal_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::growth_entry::{CreateGrowthEntry, GrowthEntry};

const COLUMNS: &str =
    "id, plant_id, entry_date, image_url, height, num_leaves, notes, created_at, updated_at";

/// Provides operations for growth entries.
///
/// Callers must check plant ownership first; entries are keyed by plant only.
pub struct GrowthEntryRepo;

impl GrowthEntryRepo {
    /// Record a growth entry dated now.
    pub async fn create(
        pool: &SqlitePool,
        plant_id: DbId,
        input: &CreateGrowthEntry,
    ) -> Result<GrowthEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO plant_entries
                (plant_id, entry_date, image_url, height, num_leaves, notes, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $2, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GrowthEntry>(&query)
            .bind(plant_id)
            .bind(Utc::now())
            .bind(&input.image_url)
            .bind(input.height)
            .bind(input.num_leaves)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// List entries for a plant, newest first.
    pub async fn list_by_plant(
        pool: &SqlitePool,
        plant_id: DbId,
    ) -> Result<Vec<GrowthEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM plant_entries
             WHERE plant_id = $1
             ORDER BY entry_date DESC, id DESC"
        );
        sqlx::query_as::<_, GrowthEntry>(&query)
            .bind(plant_id)
            .fetch_all(pool)
            .await
    }
}
