//! Plant model and DTOs.

use chrono::NaiveDate;
use plantpal_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `plants` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Plant {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub species: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub acquired_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The canonical editable plant fields, already validated.
#[derive(Debug, Clone)]
pub struct CreatePlant {
    pub name: String,
    pub species: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub acquired_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Editing a plant overwrites every editable field, so the update DTO is
/// the same shape as the insert DTO.
pub type UpdatePlant = CreatePlant;
