/// Tools for habit management
///
/// Each tool takes deserializable parameters, runs one user action against
/// a storage backend and returns a serializable response carrying a
/// human-readable message. The command line and the JSON-RPC server share
/// them.

pub mod category;
pub mod chart;
pub mod config;
pub mod create;
pub mod list;
pub mod log;
pub mod stats;
pub mod status;
pub mod update;

// Re-export tool functions for easy access
pub use category::*;
pub use chart::*;
pub use config::*;
pub use create::*;
pub use list::*;
pub use log::*;
pub use stats::*;
pub use status::*;
pub use update::*;

use chrono::NaiveDate;

use crate::domain::{Category, CategoryId, Habit, HabitId};
use crate::storage::{HabitStorage, StorageError};
use crate::TrackerError;

/// Find a habit by full id, unique id prefix or case-insensitive name.
///
/// Archived habits are included. An exact name match wins over an id
/// prefix; more than one candidate of the winning kind is an error.
pub fn resolve_habit<S: HabitStorage>(storage: &S, reference: &str) -> Result<Habit, TrackerError> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(TrackerError::InvalidInput("Habit reference cannot be empty".to_string()));
    }

    if let Ok(habit_id) = HabitId::from_string(reference) {
        return Ok(storage.get_habit(&habit_id)?);
    }

    let habits = storage.list_habits(true)?;

    let by_name: Vec<&Habit> = habits
        .iter()
        .filter(|h| h.name.to_lowercase() == reference.to_lowercase())
        .collect();
    if !by_name.is_empty() {
        return single_match(reference, by_name);
    }

    let prefix = reference.to_lowercase();
    let by_id: Vec<&Habit> = habits
        .iter()
        .filter(|h| h.id.to_string().starts_with(&prefix))
        .collect();
    if !by_id.is_empty() {
        return single_match(reference, by_id);
    }

    Err(StorageError::HabitNotFound {
        habit_id: reference.to_string(),
    }
    .into())
}

fn single_match(reference: &str, candidates: Vec<&Habit>) -> Result<Habit, TrackerError> {
    match candidates.as_slice() {
        [habit] => Ok((*habit).clone()),
        _ => Err(TrackerError::AmbiguousHabit {
            reference: reference.to_string(),
            candidates: candidates
                .iter()
                .map(|h| format!("{} ({})", h.name, h.id.short()))
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

/// Find a category by id or case-insensitive name
pub fn resolve_category<S: HabitStorage>(storage: &S, reference: &str) -> Result<Category, TrackerError> {
    let reference = reference.trim();

    if let Ok(category_id) = CategoryId::from_string(reference) {
        if let Some(category) = storage.find_category(&category_id)? {
            return Ok(category);
        }
    }

    storage
        .list_categories()?
        .into_iter()
        .find(|c| c.name.to_lowercase() == reference.to_lowercase())
        .ok_or_else(|| {
            StorageError::CategoryNotFound {
                category_id: reference.to_string(),
            }
            .into()
        })
}

/// Parse a `YYYY-MM-DD` date argument
pub fn parse_date(input: &str) -> Result<NaiveDate, TrackerError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        TrackerError::InvalidInput(format!("Invalid date '{}', expected YYYY-MM-DD", input))
    })
}

/// "1 day" / "3 days"
pub(crate) fn plural(count: u32, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}
