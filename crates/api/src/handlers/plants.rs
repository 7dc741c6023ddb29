//! Handlers for plant pages and the add / edit / delete forms.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};
use chrono::Utc;
use plantpal_core::care::TaskType;
use plantpal_core::error::CoreError;
use plantpal_core::listing::ListingStatus;
use plantpal_core::plants::{
    optional_text, parse_acquired_date, validate_plant_name, validate_plant_notes,
    FORM_DATE_FORMAT,
};
use plantpal_core::samples::{sample_plants, SamplePlant};
use plantpal_core::types::{DbId, Timestamp};
use plantpal_db::models::care_task::CareTask;
use plantpal_db::models::growth_entry::GrowthEntry;
use plantpal_db::models::plant::{CreatePlant, Plant};
use plantpal_db::repositories::{CareTaskRepo, GrowthEntryRepo, PlantRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::{plant_path, PLANTS_PATH};
use crate::middleware::auth::CurrentUser;
use crate::response::PageResponse;
use crate::state::AppState;
use crate::views::{listing, NavShell, Sample};

/// Where the photo widget posts its file.
pub const PLANT_IMAGE_UPLOAD_ACTION: &str = "/dashboard/uploads/plant-image";

// ---------------------------------------------------------------------------
// Form / view types
// ---------------------------------------------------------------------------

/// Form body shared by the add and edit plant forms.
///
/// Unknown fields are ignored, so older clients posting extra fields
/// still succeed.
#[derive(Debug, Default, Deserialize)]
pub struct PlantForm {
    #[serde(default)]
    pub name: String,
    pub species: Option<String>,
    pub location: Option<String>,
    pub acquired_date: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
}

impl PlantForm {
    /// Validate and normalise into the canonical field set.
    pub fn into_input(self) -> Result<CreatePlant, CoreError> {
        let name = validate_plant_name(&self.name)?;
        let notes = optional_text(self.notes);
        validate_plant_notes(notes.as_deref())?;
        let acquired_date = parse_acquired_date(self.acquired_date.as_deref())?;

        Ok(CreatePlant {
            name,
            species: optional_text(self.species),
            image_url: optional_text(self.image_url),
            location: optional_text(self.location),
            acquired_date,
            notes,
        })
    }
}

/// Current field values rendered into the plant form.
#[derive(Debug, Default, Serialize)]
pub struct PlantFormValues {
    pub name: String,
    pub species: String,
    pub location: String,
    pub acquired_date: String,
    pub notes: String,
    pub image_url: String,
}

#[derive(Debug, Serialize)]
pub struct PlantFormView {
    pub action: String,
    pub cancel_href: String,
    pub upload_action: &'static str,
    pub values: PlantFormValues,
}

#[derive(Debug, Serialize)]
pub struct PlantListView {
    pub status: ListingStatus,
    pub plants: Vec<Plant>,
    /// Showcase plants; only filled when the user has none.
    pub samples: Vec<Sample<SamplePlant>>,
    /// Set when the list could not be loaded.
    pub message: Option<String>,
    pub add_href: &'static str,
}

/// A completed task in a plant's care history.
#[derive(Debug, Serialize)]
pub struct CareHistoryItem {
    #[serde(flatten)]
    pub task: CareTask,
    /// Past-tense label, e.g. "Watered".
    pub label: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct PlantActions {
    pub edit: String,
    pub delete: String,
    pub add_entry: String,
    pub add_task: String,
}

#[derive(Debug, Serialize)]
pub struct PlantDetailView {
    pub plant: Plant,
    pub entries: Vec<GrowthEntry>,
    pub care_history: Vec<CareHistoryItem>,
    pub last_watered: Option<Timestamp>,
    pub actions: PlantActions,
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// GET /dashboard/plants
///
/// The user's plants, newest first. An empty collection shows the sample
/// plants; a failed query shows a message instead.
pub async fn list_plants(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Json<PageResponse<PlantListView>> {
    let plants = listing(
        PlantRepo::list_for_user(&state.pool, user.id(), None).await,
        "plants",
    );

    let status = plants.status();
    let message = plants.message().map(str::to_string);
    let samples = if status == ListingStatus::Empty {
        Sample::wrap(sample_plants())
    } else {
        Vec::new()
    };

    Json(PageResponse {
        nav: NavShell::for_user(&user),
        data: PlantListView {
            status,
            plants: plants.into_rows(),
            samples,
            message,
            add_href: "/dashboard/plants/add",
        },
    })
}

/// GET /dashboard/plants/{id}
///
/// Plant with its growth entries and care history. A missing or foreign
/// plant redirects to the plant list.
pub async fn plant_detail(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let Some(plant) = PlantRepo::find_for_user(&state.pool, id, user.id()).await? else {
        return Ok(Redirect::to(PLANTS_PATH).into_response());
    };

    let entries = GrowthEntryRepo::list_by_plant(&state.pool, id).await?;
    let history = CareTaskRepo::list_history_by_plant(&state.pool, id).await?;
    let last_watered = CareTaskRepo::last_completed_of_type(&state.pool, id, TaskType::Water)
        .await?
        .and_then(|t| t.completed_date);

    let care_history = history
        .into_iter()
        .map(|task| CareHistoryItem {
            label: task.kind().map(TaskType::past_tense),
            task,
        })
        .collect();

    let base = plant_path(id);
    let view = PlantDetailView {
        plant,
        entries,
        care_history,
        last_watered,
        actions: PlantActions {
            edit: format!("{base}/edit"),
            delete: format!("{base}/delete"),
            add_entry: format!("{base}/add-entry"),
            add_task: format!("{base}/add-task"),
        },
    };

    Ok(Json(PageResponse {
        nav: NavShell::for_user(&user),
        data: view,
    })
    .into_response())
}

/// GET /dashboard/plants/add
pub async fn add_plant_form(user: CurrentUser) -> Json<PageResponse<PlantFormView>> {
    let values = PlantFormValues {
        acquired_date: Utc::now().date_naive().format(FORM_DATE_FORMAT).to_string(),
        ..Default::default()
    };

    Json(PageResponse {
        nav: NavShell::for_user(&user),
        data: PlantFormView {
            action: "/dashboard/plants/add".to_string(),
            cancel_href: PLANTS_PATH.to_string(),
            upload_action: PLANT_IMAGE_UPLOAD_ACTION,
            values,
        },
    })
}

/// GET /dashboard/plants/{id}/edit
///
/// Form pre-filled with the plant's current values.
pub async fn edit_plant_form(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let Some(plant) = PlantRepo::find_for_user(&state.pool, id, user.id()).await? else {
        return Ok(Redirect::to(PLANTS_PATH).into_response());
    };

    let values = PlantFormValues {
        name: plant.name,
        species: plant.species.unwrap_or_default(),
        location: plant.location.unwrap_or_default(),
        acquired_date: plant
            .acquired_date
            .map(|d| d.format(FORM_DATE_FORMAT).to_string())
            .unwrap_or_default(),
        notes: plant.notes.unwrap_or_default(),
        image_url: plant.image_url.unwrap_or_default(),
    };

    Ok(Json(PageResponse {
        nav: NavShell::for_user(&user),
        data: PlantFormView {
            action: format!("{}/edit", plant_path(id)),
            cancel_href: plant_path(id),
            upload_action: PLANT_IMAGE_UPLOAD_ACTION,
            values,
        },
    })
    .into_response())
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// POST /dashboard/plants/add
pub async fn create_plant(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<PlantForm>,
) -> AppResult<Redirect> {
    let input = form.into_input()?;
    let plant = PlantRepo::create(&state.pool, user.id(), &input).await?;

    tracing::info!(user_id = user.id(), plant_id = plant.id, "Plant created");
    Ok(Redirect::to(PLANTS_PATH))
}

/// POST /dashboard/plants/{id}/edit
///
/// Overwrites every editable field.
pub async fn update_plant(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
    Form(form): Form<PlantForm>,
) -> AppResult<Redirect> {
    let input = form.into_input()?;
    PlantRepo::update(&state.pool, id, user.id(), &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Plant", id }))?;

    tracing::info!(user_id = user.id(), plant_id = id, "Plant updated");
    Ok(Redirect::to(&plant_path(id)))
}

/// POST /dashboard/plants/{id}/delete
///
/// Removes the plant with all of its growth entries and care tasks.
pub async fn delete_plant(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Redirect> {
    let deleted = PlantRepo::delete_cascade(&state.pool, id, user.id()).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Plant", id }));
    }

    tracing::info!(user_id = user.id(), plant_id = id, "Plant deleted");
    Ok(Redirect::to(PLANTS_PATH))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a plant owned by `user_id` for a mutation, or fail with 404.
pub(crate) async fn require_plant(state: &AppState, id: DbId, user_id: DbId) -> AppResult<Plant> {
    PlantRepo::find_for_user(&state.pool, id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Plant", id }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn blank_optionals_become_absent() {
        let form = PlantForm {
            name: " Monstera ".into(),
            species: Some("".into()),
            location: Some("  ".into()),
            acquired_date: Some("".into()),
            ..Default::default()
        };
        let input = form.into_input().unwrap();
        assert_eq!(input.name, "Monstera");
        assert_eq!(input.species, None);
        assert_eq!(input.location, None);
        assert_eq!(input.acquired_date, None);
    }

    #[test]
    fn missing_name_rejected() {
        assert_matches!(
            PlantForm::default().into_input(),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn bad_date_rejected() {
        let form = PlantForm {
            name: "Fern".into(),
            acquired_date: Some("yesterday".into()),
            ..Default::default()
        };
        assert_matches!(form.into_input(), Err(CoreError::Validation(_)));
    }
}
