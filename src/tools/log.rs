/// Tools for recording habit completions
///
/// This module implements toggle_habit (check or uncheck today) and
/// complete_habit (append one completion, optionally backdated with notes).

use serde::{Deserialize, Serialize};
use crate::stats::StatsService;
use crate::storage::HabitStorage;
use crate::tools::{parse_date, plural, resolve_habit};
use crate::TrackerError;

/// Parameters for toggling today's completion
#[derive(Debug, Deserialize)]
pub struct ToggleHabitParams {
    /// Habit id, id prefix or name
    pub habit: String,
}

/// Response from toggling a habit
#[derive(Debug, Serialize)]
pub struct ToggleHabitResponse {
    pub success: bool,
    pub habit_id: String,
    /// Whether the habit is now checked for today
    pub completed: bool,
    pub completions_today: u32,
    pub current_streak: u32,
    pub message: String,
}

/// Parameters for logging a habit completion
#[derive(Debug, Default, Deserialize)]
pub struct CompleteHabitParams {
    pub habit: String,
    /// `YYYY-MM-DD`, defaults to today
    pub date: Option<String>,
    pub notes: Option<String>,
}

/// Response from logging a habit
#[derive(Debug, Serialize)]
pub struct CompleteHabitResponse {
    pub success: bool,
    pub completion_id: String,
    pub completed_on: String,
    /// Records for the habit on that date, including this one
    pub completions_on_date: u32,
    pub current_streak: u32,
    pub message: String,
}

/// Check a habit for today, or uncheck it when already done
pub fn toggle_habit<S: HabitStorage>(
    storage: &S,
    params: ToggleHabitParams,
) -> Result<ToggleHabitResponse, TrackerError> {
    let habit = resolve_habit(storage, &params.habit)?;
    let stats = StatsService::new(storage);

    let completed = stats.toggle_completion(&habit.id)?;
    let streak = stats.streak_for(&habit.id)?;
    let completions_today = storage.count_completions_on(&habit.id, stats.today())?;

    let message = if completed {
        format!(
            "🔥 Checked '{}' for today! Current streak: {}",
            habit.display_name(),
            plural(streak.current, "day")
        )
    } else {
        format!("↩️ Unchecked '{}' for today", habit.display_name())
    };

    Ok(ToggleHabitResponse {
        success: true,
        habit_id: habit.id.to_string(),
        completed,
        completions_today,
        current_streak: streak.current,
        message,
    })
}

/// Log one completion of a habit
pub fn complete_habit<S: HabitStorage>(
    storage: &S,
    params: CompleteHabitParams,
) -> Result<CompleteHabitResponse, TrackerError> {
    let habit = resolve_habit(storage, &params.habit)?;
    let stats = StatsService::new(storage);

    let date = match params.date.as_deref() {
        Some(date_str) => parse_date(date_str)?,
        None => stats.today(),
    };

    let completion = stats.record_completion(&habit.id, date, params.notes)?;
    let completions_on_date = storage.count_completions_on(&habit.id, date)?;
    let streak = stats.streak_for(&habit.id)?;

    let mut message = format!(
        "🔥 Logged '{}' for {}! Current streak: {}",
        habit.display_name(),
        date,
        plural(streak.current, "day")
    );
    if habit.target_per_day > 1 {
        message.push_str(&format!(
            "\n   {}/{} of the daily target",
            completions_on_date, habit.target_per_day
        ));
    }

    Ok(CompleteHabitResponse {
        success: true,
        completion_id: completion.id.to_string(),
        completed_on: date.to_string(),
        completions_on_date,
        current_streak: streak.current,
        message,
    })
}
