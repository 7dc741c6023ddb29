//! Tagged result of a list query.
//!
//! Pages distinguish "the query succeeded and found nothing" from "the
//! query failed" instead of treating both as an empty list.

use serde::Serialize;

/// Outcome of fetching a collection for display.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing<T> {
    /// At least one row was returned.
    Populated(Vec<T>),
    /// The query succeeded with zero rows.
    Empty,
    /// The query failed; carries a user-facing message.
    Unavailable(String),
}

/// Serialized discriminant of a [`Listing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Populated,
    Empty,
    Unavailable,
}

impl<T> Listing<T> {
    /// Classify a query result. The error itself is not exposed, only a
    /// generic message naming what could not be loaded.
    pub fn from_result<E>(result: Result<Vec<T>, E>, what: &str) -> Self {
        match result {
            Ok(rows) if rows.is_empty() => Listing::Empty,
            Ok(rows) => Listing::Populated(rows),
            Err(_) => Listing::Unavailable(format!("Could not load {what} right now")),
        }
    }

    pub fn status(&self) -> ListingStatus {
        match self {
            Listing::Populated(_) => ListingStatus::Populated,
            Listing::Empty => ListingStatus::Empty,
            Listing::Unavailable(_) => ListingStatus::Unavailable,
        }
    }

    /// Rows of a populated listing; empty otherwise.
    pub fn into_rows(self) -> Vec<T> {
        match self {
            Listing::Populated(rows) => rows,
            Listing::Empty | Listing::Unavailable(_) => Vec::new(),
        }
    }

    /// Failure message, if the listing is unavailable.
    pub fn message(&self) -> Option<&str> {
        match self {
            Listing::Unavailable(msg) => Some(msg),
            _ => None,
        }
    }
}
