//! Growth entry model (`plant_entries` table).

use plantpal_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `plant_entries` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GrowthEntry {
    pub id: DbId,
    pub plant_id: DbId,
    pub entry_date: Timestamp,
    pub image_url: Option<String>,
    /// Height in centimetres.
    pub height: Option<f64>,
    pub num_leaves: Option<i32>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a growth entry. The entry date is the insert instant.
#[derive(Debug, Clone, Default)]
pub struct CreateGrowthEntry {
    pub image_url: Option<String>,
    pub height: Option<f64>,
    pub num_leaves: Option<i32>,
    pub notes: Option<String>,
}
