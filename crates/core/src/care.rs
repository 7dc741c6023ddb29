//! Care task types and the timing rules for recording care activity.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Task types
// ---------------------------------------------------------------------------

/// The kind of care activity a task represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    #[default]
    Water,
    Fertilize,
    Prune,
    Repot,
}

impl TaskType {
    /// Every task type, in the order the care form offers them.
    pub const ALL: [TaskType; 4] = [
        TaskType::Water,
        TaskType::Fertilize,
        TaskType::Prune,
        TaskType::Repot,
    ];

    /// Stored (lower-case) representation.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskType::Water => "water",
            TaskType::Fertilize => "fertilize",
            TaskType::Prune => "prune",
            TaskType::Repot => "repot",
        }
    }

    /// Capitalised label used in views ("Water", "Fertilize", ...).
    pub fn label(self) -> &'static str {
        match self {
            TaskType::Water => "Water",
            TaskType::Fertilize => "Fertilize",
            TaskType::Prune => "Prune",
            TaskType::Repot => "Repot",
        }
    }

    /// Past-tense label used in care history ("Watered", "Fertilized", ...).
    pub fn past_tense(self) -> &'static str {
        match self {
            TaskType::Water => "Watered",
            TaskType::Fertilize => "Fertilized",
            TaskType::Prune => "Pruned",
            TaskType::Repot => "Repotted",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid task type '{s}'. Must be one of: water, fertilize, prune, repot"
                ))
            })
    }
}

/// Parse the `task_type` form field; a blank field selects the default.
pub fn parse_task_type(value: Option<&str>) -> Result<TaskType, CoreError> {
    match value.map(str::trim) {
        None | Some("") => Ok(TaskType::default()),
        Some(raw) => raw.parse(),
    }
}

// ---------------------------------------------------------------------------
// Timing rules
// ---------------------------------------------------------------------------

/// Timestamps of a task recorded as done at the moment of submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletedNow {
    pub due_date: Timestamp,
    pub completed_date: Timestamp,
}

/// A task logged through the care form is complete on arrival: its due
/// date is its completion instant, whatever due date the client sent.
pub fn completed_now(now: Timestamp) -> CompletedNow {
    CompletedNow {
        due_date: now,
        completed_date: now,
    }
}

/// Whether an incomplete task is past due.
pub fn is_overdue(due_date: Timestamp, now: Timestamp) -> bool {
    due_date < now
}

/// Group items (already sorted by due date) into consecutive calendar days.
pub fn group_by_due_day<T>(
    items: Vec<T>,
    due_date: impl Fn(&T) -> Timestamp,
) -> Vec<(NaiveDate, Vec<T>)> {
    let mut groups: Vec<(NaiveDate, Vec<T>)> = Vec::new();
    for item in items {
        let day = due_date(&item).date_naive();
        match groups.last_mut() {
            Some((last_day, bucket)) if *last_day == day => bucket.push(item),
            _ => groups.push((day, vec![item])),
        }
    }
    groups
}
