//! Handler for the plant photo upload widget.

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use plantpal_core::storage::{file_extension, plant_image_key, BUCKET_PLANTS};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field carrying the file.
const FILE_FIELD: &str = "file";

/// Public URL of a stored upload.
#[derive(Debug, Serialize)]
pub struct UploadedImage {
    pub url: String,
}

/// The first file part of a multipart upload.
pub(crate) struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn extension(&self) -> String {
        file_extension(&self.file_name)
    }
}

/// Read the first `file` part. Any further parts are left unread.
pub(crate) async fn first_file(multipart: &mut Multipart) -> AppResult<UploadedFile> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        return Ok(UploadedFile { file_name, bytes });
    }

    Err(AppError::BadRequest("Missing required 'file' field".into()))
}

/// POST /dashboard/uploads/plant-image
///
/// Stores a plant or growth-entry photo under a fresh random name and
/// returns its public URL for the form's `image_url` field.
pub async fn upload_plant_image(
    State(state): State<AppState>,
    user: CurrentUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<UploadedImage>>)> {
    let file = first_file(&mut multipart).await?;

    let key = plant_image_key(user.id(), Uuid::new_v4(), &file.extension());
    let url = state.blobs.put(BUCKET_PLANTS, &key, &file.bytes).await?;

    tracing::info!(user_id = user.id(), key = %key, size = file.bytes.len(), "Plant image uploaded");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UploadedImage { url },
        }),
    ))
}
