/// Tools for editing existing habits
///
/// This module implements update_habit and the lifecycle tools
/// (archive, unarchive and delete).

use serde::{Deserialize, Serialize};
use crate::domain::Habit;
use crate::storage::HabitStorage;
use crate::tools::create::non_blank;
use crate::tools::{parse_frequency, resolve_category, resolve_habit};
use crate::TrackerError;

/// Parameters for updating an existing habit
///
/// Omitted fields stay as they are. An empty description, emoji or category
/// clears it.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateHabitParams {
    /// Habit id, id prefix or name
    pub habit: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub emoji: Option<String>,
    pub category: Option<String>,
    pub frequency: Option<String>,
    pub target_per_day: Option<u32>,
}

/// Response from updating a habit
#[derive(Debug, Serialize)]
pub struct UpdateHabitResponse {
    pub success: bool,
    pub habit: Habit,
    pub message: String,
}

/// Parameters naming a single habit
#[derive(Debug, Deserialize)]
pub struct HabitRefParams {
    pub habit: String,
}

/// Response from archiving, unarchiving or deleting a habit
#[derive(Debug, Serialize)]
pub struct HabitLifecycleResponse {
    pub success: bool,
    pub habit_id: String,
    pub message: String,
}

/// Update an existing habit using the provided storage
pub fn update_habit<S: HabitStorage>(
    storage: &S,
    params: UpdateHabitParams,
) -> Result<UpdateHabitResponse, TrackerError> {
    let mut habit = resolve_habit(storage, &params.habit)?;

    let frequency = match params.frequency.as_deref() {
        Some(freq_str) => Some(parse_frequency(freq_str)?),
        None => None,
    };

    let category_id = match params.category.as_deref() {
        Some(reference) => match non_blank(Some(reference)) {
            Some(reference) => Some(Some(resolve_category(storage, reference)?.id)),
            None => Some(None),
        },
        None => None,
    };

    habit.update(
        params.name,
        params.description.map(clear_if_blank),
        params.emoji.map(clear_if_blank),
        category_id,
        frequency,
        params.target_per_day,
    )?;

    storage.update_habit(&habit)?;

    Ok(UpdateHabitResponse {
        success: true,
        message: format!("✅ Updated habit '{}'", habit.display_name()),
        habit,
    })
}

/// Hide a habit from today's list and the statistics, keeping its history
pub fn archive_habit<S: HabitStorage>(
    storage: &S,
    params: HabitRefParams,
) -> Result<HabitLifecycleResponse, TrackerError> {
    let habit = resolve_habit(storage, &params.habit)?;
    storage.set_archived(&habit.id, true)?;

    Ok(HabitLifecycleResponse {
        success: true,
        habit_id: habit.id.to_string(),
        message: format!("📦 Archived habit '{}'", habit.display_name()),
    })
}

/// Bring an archived habit back
pub fn unarchive_habit<S: HabitStorage>(
    storage: &S,
    params: HabitRefParams,
) -> Result<HabitLifecycleResponse, TrackerError> {
    let habit = resolve_habit(storage, &params.habit)?;
    storage.set_archived(&habit.id, false)?;

    Ok(HabitLifecycleResponse {
        success: true,
        habit_id: habit.id.to_string(),
        message: format!("▶️ Restored habit '{}'", habit.display_name()),
    })
}

/// Permanently delete a habit together with its completions
pub fn delete_habit<S: HabitStorage>(
    storage: &S,
    params: HabitRefParams,
) -> Result<HabitLifecycleResponse, TrackerError> {
    let habit = resolve_habit(storage, &params.habit)?;
    let completions = storage.count_completions(&habit.id)?;
    storage.delete_habit(&habit.id)?;

    Ok(HabitLifecycleResponse {
        success: true,
        habit_id: habit.id.to_string(),
        message: format!(
            "🗑️ Deleted habit '{}' and {}",
            habit.display_name(),
            crate::tools::plural(completions, "completion")
        ),
    })
}

fn clear_if_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
