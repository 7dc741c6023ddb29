//! Handlers for the growth entry form.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};
use plantpal_core::growth::{parse_height, parse_leaf_count};
use plantpal_core::plants::optional_text;
use plantpal_core::types::DbId;
use plantpal_db::models::growth_entry::CreateGrowthEntry;
use plantpal_db::repositories::{GrowthEntryRepo, PlantRepo};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::handlers::plants::{require_plant, PLANT_IMAGE_UPLOAD_ACTION};
use crate::handlers::{plant_path, PLANTS_PATH};
use crate::middleware::auth::CurrentUser;
use crate::response::PageResponse;
use crate::state::AppState;
use crate::views::NavShell;

/// Form body for `POST /dashboard/plants/{id}/add-entry`.
///
/// Measurements arrive as raw text; anything unparsable is stored as absent.
#[derive(Debug, Default, Deserialize)]
pub struct GrowthEntryForm {
    pub height: Option<String>,
    pub num_leaves: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
}

impl From<GrowthEntryForm> for CreateGrowthEntry {
    fn from(form: GrowthEntryForm) -> Self {
        Self {
            image_url: optional_text(form.image_url),
            height: parse_height(form.height.as_deref()),
            num_leaves: parse_leaf_count(form.num_leaves.as_deref()),
            notes: optional_text(form.notes),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GrowthEntryFormView {
    pub plant_id: DbId,
    pub plant_name: String,
    pub action: String,
    pub cancel_href: String,
    pub upload_action: &'static str,
}

/// GET /dashboard/plants/{id}/add-entry
pub async fn add_entry_form(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let Some(plant) = PlantRepo::find_for_user(&state.pool, id, user.id()).await? else {
        return Ok(Redirect::to(PLANTS_PATH).into_response());
    };

    Ok(Json(PageResponse {
        nav: NavShell::for_user(&user),
        data: GrowthEntryFormView {
            plant_id: plant.id,
            plant_name: plant.name,
            action: format!("{}/add-entry", plant_path(id)),
            cancel_href: plant_path(id),
            upload_action: PLANT_IMAGE_UPLOAD_ACTION,
        },
    })
    .into_response())
}

/// POST /dashboard/plants/{id}/add-entry
///
/// Records a growth entry dated now.
pub async fn create_entry(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
    Form(form): Form<GrowthEntryForm>,
) -> AppResult<Redirect> {
    require_plant(&state, id, user.id()).await?;

    let entry = GrowthEntryRepo::create(&state.pool, id, &form.into()).await?;

    tracing::info!(
        user_id = user.id(),
        plant_id = id,
        entry_id = entry.id,
        "Growth entry recorded"
    );
    Ok(Redirect::to(&plant_path(id)))
}
