/// Tool for creating new habits
///
/// This module implements the create_habit tool.

use serde::{Deserialize, Serialize};
use crate::domain::{Frequency, Habit};
use crate::storage::HabitStorage;
use crate::tools::resolve_category;
use crate::TrackerError;

/// Parameters for creating a new habit
#[derive(Debug, Default, Deserialize)]
pub struct CreateHabitParams {
    pub name: String,
    pub description: Option<String>,
    pub emoji: Option<String>,
    /// Category id or name
    pub category: Option<String>,
    /// `daily`, `weekly`, `3x`, `3/week` or `times_per_week:3`; daily when omitted
    pub frequency: Option<String>,
    pub target_per_day: Option<u32>,
}

/// Response from creating a habit
#[derive(Debug, Serialize)]
pub struct CreateHabitResponse {
    pub success: bool,
    pub habit_id: String,
    pub habit: Habit,
    pub message: String,
}

/// Create a new habit using the provided storage
pub fn create_habit<S: HabitStorage>(
    storage: &S,
    params: CreateHabitParams,
) -> Result<CreateHabitResponse, TrackerError> {
    let frequency = match params.frequency.as_deref() {
        Some(freq_str) => parse_frequency(freq_str)?,
        None => Frequency::Daily,
    };

    let category_id = match non_blank(params.category.as_deref()) {
        Some(reference) => Some(resolve_category(storage, reference)?.id),
        None => None,
    };

    let habit = Habit::new(
        params.name,
        params.description.filter(|d| !d.trim().is_empty()),
        category_id,
        frequency,
        params.target_per_day.unwrap_or(1),
    )?
    .with_emoji(params.emoji.filter(|e| !e.trim().is_empty()))?;

    storage.create_habit(&habit)?;

    Ok(CreateHabitResponse {
        success: true,
        habit_id: habit.id.to_string(),
        message: format!(
            "✅ Created habit '{}' ({}). Ready to start your streak!",
            habit.display_name(),
            habit.frequency
        ),
        habit,
    })
}

/// Parse a frequency argument into a validated Frequency
pub fn parse_frequency(freq_str: &str) -> Result<Frequency, TrackerError> {
    let normalized = freq_str.trim().to_lowercase();
    let invalid = || {
        TrackerError::InvalidInput(format!(
            "Invalid frequency '{}'. Valid options: daily, weekly, Nx, N/week, times_per_week:N",
            freq_str
        ))
    };

    let frequency = match normalized.as_str() {
        "daily" | "d" => Frequency::Daily,
        "weekly" | "w" => Frequency::Weekly,
        other => {
            let count = other
                .strip_prefix("times_per_week:")
                .or_else(|| other.strip_suffix("x/week"))
                .or_else(|| other.strip_suffix("/week"))
                .or_else(|| other.strip_suffix('x'))
                .ok_or_else(invalid)?;
            let times: u8 = count.trim().parse().map_err(|_| invalid())?;
            Frequency::TimesPerWeek(times)
        }
    };

    frequency.validate()?;
    Ok(frequency)
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
