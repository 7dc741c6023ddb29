//! Handlers for the profile page, the profile edit form and the avatar
//! upload widget.

use axum::extract::{Multipart, State};
use axum::response::Redirect;
use axum::{Form, Json};
use chrono::Utc;
use plantpal_core::care::TaskType;
use plantpal_core::error::CoreError;
use plantpal_core::plants::optional_text;
use plantpal_core::profile::{display_bio, display_name, validate_profile};
use plantpal_core::storage::{avatar_key, BUCKET_AVATARS};
use plantpal_core::types::Timestamp;
use plantpal_db::models::user::UpdateProfile;
use plantpal_db::repositories::{CareTaskRepo, PlantRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::uploads::{first_file, UploadedImage};
use crate::handlers::PROFILE_PATH;
use crate::middleware::auth::CurrentUser;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;
use crate::views::NavShell;

const AVATAR_UPLOAD_ACTION: &str = "/dashboard/profile/avatar";

/// Form body for `POST /dashboard/profile/edit`.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileForm {
    pub full_name: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileStats {
    pub plants: i64,
    pub waterings: i64,
    pub fertilizings: i64,
}

#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub display_name: String,
    pub email: String,
    pub bio: String,
    /// Empty when no picture has been uploaded.
    pub avatar_url: String,
    pub member_since: Timestamp,
    pub stats: ProfileStats,
    pub edit_href: &'static str,
    pub avatar_upload_action: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ProfileFormView {
    pub action: &'static str,
    pub cancel_href: &'static str,
    pub email: String,
    pub full_name: String,
    pub bio: String,
}

/// GET /dashboard/profile
pub async fn profile_page(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<PageResponse<ProfileView>>> {
    let user_id = user.id();
    let stats = ProfileStats {
        plants: PlantRepo::count_for_user(&state.pool, user_id).await?,
        waterings: CareTaskRepo::count_completed_by_type_for_user(
            &state.pool,
            user_id,
            TaskType::Water,
        )
        .await?,
        fertilizings: CareTaskRepo::count_completed_by_type_for_user(
            &state.pool,
            user_id,
            TaskType::Fertilize,
        )
        .await?,
    };

    let profile = &user.profile;
    let view = ProfileView {
        display_name: display_name(profile.full_name.as_deref(), &profile.email),
        email: profile.email.clone(),
        bio: display_bio(profile.bio.as_deref()),
        avatar_url: profile.avatar_url.clone().unwrap_or_default(),
        member_since: profile.created_at,
        stats,
        edit_href: "/dashboard/profile/edit",
        avatar_upload_action: AVATAR_UPLOAD_ACTION,
    };

    Ok(Json(PageResponse {
        nav: NavShell::for_user(&user),
        data: view,
    }))
}

/// GET /dashboard/profile/edit
pub async fn edit_profile_form(user: CurrentUser) -> Json<PageResponse<ProfileFormView>> {
    let profile = &user.profile;
    let view = ProfileFormView {
        action: "/dashboard/profile/edit",
        cancel_href: PROFILE_PATH,
        email: profile.email.clone(),
        full_name: profile.full_name.clone().unwrap_or_default(),
        bio: profile.bio.clone().unwrap_or_default(),
    };

    Json(PageResponse {
        nav: NavShell::for_user(&user),
        data: view,
    })
}

/// POST /dashboard/profile/edit
///
/// Overwrites name and biography; blank fields clear them.
pub async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<ProfileForm>,
) -> AppResult<Redirect> {
    validate_profile(
        form.full_name.as_deref().unwrap_or_default(),
        form.bio.as_deref().unwrap_or_default(),
    )?;

    let input = UpdateProfile {
        full_name: optional_text(form.full_name),
        bio: optional_text(form.bio),
    };
    UserRepo::update_profile(&state.pool, user.id(), &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.id(),
        }))?;

    tracing::info!(user_id = user.id(), "Profile updated");
    Ok(Redirect::to(PROFILE_PATH))
}

/// POST /dashboard/profile/avatar
///
/// Stores a new profile picture and points the profile at it.
pub async fn upload_avatar(
    State(state): State<AppState>,
    user: CurrentUser,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<UploadedImage>>> {
    let file = first_file(&mut multipart).await?;

    let key = avatar_key(user.id(), Utc::now().timestamp_millis(), &file.extension());
    let url = state.blobs.put(BUCKET_AVATARS, &key, &file.bytes).await?;

    UserRepo::set_avatar_url(&state.pool, user.id(), &url)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.id(),
        }))?;

    tracing::info!(user_id = user.id(), key = %key, "Avatar updated");
    Ok(Json(DataResponse {
        data: UploadedImage { url },
    }))
}
