//! Plant form rules: the canonical field set, required-name validation and
//! normalisation of optional text fields.

use chrono::NaiveDate;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a plant name in characters.
pub const MAX_PLANT_NAME_LENGTH: usize = 120;

/// Maximum length of the free-form plant notes.
pub const MAX_PLANT_NOTES_LENGTH: usize = 5_000;

/// Date format used by `<input type="date">` submissions.
pub const FORM_DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Validation / normalisation
// ---------------------------------------------------------------------------

/// Validate a submitted plant name and return it trimmed.
///
/// The name is the only required plant field; blank or whitespace-only
/// names are rejected for both create and edit.
pub fn validate_plant_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Plant name is required".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_PLANT_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Plant name must be at most {MAX_PLANT_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate the length of the plant notes field.
pub fn validate_plant_notes(notes: Option<&str>) -> Result<(), CoreError> {
    match notes {
        Some(n) if n.chars().count() > MAX_PLANT_NOTES_LENGTH => Err(CoreError::Validation(
            format!("Notes must be at most {MAX_PLANT_NOTES_LENGTH} characters"),
        )),
        _ => Ok(()),
    }
}

/// Collapse a blank form field to `None`, otherwise return it trimmed.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parse the `acquired_date` form field.
///
/// Blank input yields `None`; anything else must be a `YYYY-MM-DD` date.
pub fn parse_acquired_date(value: Option<&str>) -> Result<Option<NaiveDate>, CoreError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, FORM_DATE_FORMAT)
            .map(Some)
            .map_err(|_| {
                CoreError::Validation(format!(
                    "Invalid acquired date '{raw}'. Expected YYYY-MM-DD"
                ))
            }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
