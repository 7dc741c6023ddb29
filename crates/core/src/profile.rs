//! Profile display defaults and edit validation.

use crate::error::CoreError;

/// Shown when a profile has no biography.
pub const DEFAULT_BIO: &str =
    "No biography available. Edit your profile to tell more about yourself.";

/// Maximum length of the display name.
pub const MAX_FULL_NAME_LENGTH: usize = 120;

/// Maximum length of the biography.
pub const MAX_BIO_LENGTH: usize = 2_000;

/// Name shown for a profile: the full name, or the local part of the email.
pub fn display_name(full_name: Option<&str>, email: &str) -> String {
    match full_name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => email.split('@').next().unwrap_or(email).to_string(),
    }
}

/// Biography shown for a profile, falling back to [`DEFAULT_BIO`].
pub fn display_bio(bio: Option<&str>) -> String {
    match bio.map(str::trim) {
        Some(b) if !b.is_empty() => b.to_string(),
        _ => DEFAULT_BIO.to_string(),
    }
}

/// Validate the profile edit form.
pub fn validate_profile(full_name: &str, bio: &str) -> Result<(), CoreError> {
    if full_name.chars().count() > MAX_FULL_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Name must be at most {MAX_FULL_NAME_LENGTH} characters"
        )));
    }
    if bio.chars().count() > MAX_BIO_LENGTH {
        return Err(CoreError::Validation(format!(
            "Bio must be at most {MAX_BIO_LENGTH} characters"
        )));
    }
    Ok(())
}
