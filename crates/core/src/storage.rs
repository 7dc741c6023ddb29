//! Blob storage layout: bucket names, object keys and public URLs.

use uuid::Uuid;

use crate::types::DbId;

/// Bucket holding plant and growth-entry photos.
pub const BUCKET_PLANTS: &str = "plants";

/// Bucket holding profile pictures.
pub const BUCKET_AVATARS: &str = "avatars";

/// Extension used when an uploaded file name carries no usable one.
pub const FALLBACK_EXTENSION: &str = "bin";

/// Maximum length kept from a client-supplied extension.
const MAX_EXTENSION_LENGTH: usize = 10;

/// URL prefix under which stored objects are served.
pub const PUBLIC_PREFIX: &str = "/storage";

/// Extract a safe, lower-case extension from a client file name.
///
/// Only ASCII alphanumerics survive, so the result can never introduce a
/// path separator into an object key.
pub fn file_extension(file_name: &str) -> String {
    let ext: String = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or("")
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(MAX_EXTENSION_LENGTH)
        .collect::<String>()
        .to_ascii_lowercase();

    if ext.is_empty() {
        FALLBACK_EXTENSION.to_string()
    } else {
        ext
    }
}

/// Object key for a plant photo: `{user_id}/plants/{uuid}.{ext}`.
pub fn plant_image_key(user_id: DbId, id: Uuid, ext: &str) -> String {
    format!("{user_id}/plants/{id}.{ext}")
}

/// Object key for a profile picture: `{user_id}/avatar-{unix_millis}.{ext}`.
pub fn avatar_key(user_id: DbId, unix_millis: i64, ext: &str) -> String {
    format!("{user_id}/avatar-{unix_millis}.{ext}")
}

/// Public URL of a stored object.
pub fn public_url(base_url: &str, bucket: &str, key: &str) -> String {
    format!(
        "{}{PUBLIC_PREFIX}/{bucket}/{key}",
        base_url.trim_end_matches('/')
    )
}
