/// Tool for today's checklist
///
/// This module implements the today_status tool.

use serde::{Deserialize, Serialize};
use crate::domain::Frequency;
use crate::stats::{HabitStatus, StatsService};
use crate::storage::HabitStorage;
use crate::TrackerError;

/// Parameters for today's status (none yet)
#[derive(Debug, Default, Deserialize)]
pub struct TodayStatusParams {}

/// Response from checking today's status
#[derive(Debug, Serialize)]
pub struct TodayStatusResponse {
    pub date: String,
    pub habits: Vec<HabitStatus>,
    /// Due habits already completed today
    pub completed: u32,
    /// Habits due in the current period
    pub due: u32,
    pub summary: String,
    pub message: String,
}

/// Get the status of every active habit for today
pub fn today_status<S: HabitStorage>(
    storage: &S,
    _params: TodayStatusParams,
) -> Result<TodayStatusResponse, TrackerError> {
    let stats = StatsService::new(storage);
    let habits = stats.today_status()?;

    let due = habits.iter().filter(|h| h.is_due).count();
    let completed = habits.iter().filter(|h| h.is_due && h.completed_today).count();

    let summary = if habits.is_empty() {
        "No habits yet. Create your first habit to get started!".to_string()
    } else if due == 0 {
        "🎉 Nothing due today".to_string()
    } else {
        format!("📊 {}/{} completed", completed, due)
    };

    let mut message = format!("Today, {}\n{}", stats.today().format("%A %b %-d"), summary);
    for status in &habits {
        message.push('\n');
        message.push_str(&format_status(status));
    }

    Ok(TodayStatusResponse {
        date: stats.today().to_string(),
        completed: u32::try_from(completed).unwrap_or(u32::MAX),
        due: u32::try_from(due).unwrap_or(u32::MAX),
        habits,
        summary,
        message,
    })
}

fn format_status(status: &HabitStatus) -> String {
    let checkbox = if status.completed_today { "[x]" } else { "[ ]" };
    let mut line = format!("  {} {}", checkbox, status.habit.display_name());

    if status.current_streak > 0 {
        line.push_str(&format!(" 🔥{}", status.current_streak));
    }

    if let Some(category) = &status.category {
        line.push_str(&format!(" [{}]", category.name));
    }

    if status.habit.target_per_day > 1 {
        line.push_str(&format!(
            " ({}/{} today)",
            status.completions_today, status.habit.target_per_day
        ));
    }

    match &status.habit.frequency {
        Frequency::Daily => {}
        Frequency::Weekly if status.completions_this_week > 0 => line.push_str(" (done this week)"),
        Frequency::Weekly => line.push_str(" (weekly)"),
        Frequency::TimesPerWeek(times) => {
            line.push_str(&format!(" ({}/{} this week)", status.completions_this_week, times))
        }
        Frequency::Unrecognized(raw) => line.push_str(&format!(" ({})", raw)),
    }

    line
}
