/// Period aggregation
///
/// Pure functions from a snapshot of habits and completion records to the
/// per-day and per-week series shown as trends. Archived habits never count
/// on either side of a ratio.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};

use crate::domain::settings::{MAX_TREND_DAYS, MAX_TREND_WEEKS};
use crate::domain::{calendar, Completion, Habit, HabitId, StreakSummary};
use crate::stats::{percentage, DailyStat, HabitStat};

fn active_daily(habits: &[Habit]) -> Vec<&Habit> {
    habits
        .iter()
        .filter(|h| !h.is_archived() && h.frequency.is_daily())
        .collect()
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// One entry per day for the `days` days ending today, oldest first.
/// `days` is clamped to `1..=MAX_TREND_DAYS`.
///
/// Only daily habits that already existed on a day are due that day; a
/// habit counts as completed when it has at least one record for the day.
pub fn daily_series(
    habits: &[Habit],
    completions: &[Completion],
    today: NaiveDate,
    days: u32,
) -> Vec<DailyStat> {
    let days = days.clamp(1, MAX_TREND_DAYS);
    let start = today - Duration::days(i64::from(days) - 1);
    let daily = active_daily(habits);

    let done: HashSet<(NaiveDate, &HabitId)> = completions
        .iter()
        .map(|c| (c.completed_on, &c.habit_id))
        .collect();

    start
        .iter_days()
        .take(days as usize)
        .map(|date| {
            let due: Vec<&&Habit> = daily.iter().filter(|h| h.existed_on(date)).collect();
            let completed = due
                .iter()
                .filter(|h| done.contains(&(date, &h.id)))
                .count();

            DailyStat {
                date,
                completed: to_u32(completed),
                total: to_u32(due.len()),
            }
        })
        .collect()
}

/// One entry per Monday-start week for the `weeks` weeks ending with the
/// current one, oldest first. `weeks` is clamped to `1..=MAX_TREND_WEEKS`.
///
/// The denominator is seven slots per daily habit that existed by the end of
/// the week. The numerator counts every completion record of an active
/// habit in the week, whatever its frequency.
pub fn weekly_series(
    habits: &[Habit],
    completions: &[Completion],
    today: NaiveDate,
    weeks: u32,
) -> Vec<DailyStat> {
    let weeks = weeks.clamp(1, MAX_TREND_WEEKS);
    let current_week = calendar::week_start(today);
    let daily = active_daily(habits);

    let active: HashSet<&HabitId> = habits
        .iter()
        .filter(|h| !h.is_archived())
        .map(|h| &h.id)
        .collect();

    (0..weeks)
        .rev()
        .map(|weeks_back| {
            let start = current_week - Duration::weeks(i64::from(weeks_back));
            let end = start + Duration::days(6);

            let existing = daily.iter().filter(|h| h.existed_on(end)).count();
            let completed = completions
                .iter()
                .filter(|c| c.completed_on >= start && c.completed_on <= end)
                .filter(|c| active.contains(&c.habit_id))
                .count();

            DailyStat {
                date: start,
                completed: to_u32(completed),
                total: to_u32(existing).saturating_mul(7),
            }
        })
        .collect()
}

/// Completion slots available so far: elapsed days summed over active daily
/// habits
pub fn total_possible(habits: &[Habit], today: NaiveDate) -> u32 {
    active_daily(habits)
        .iter()
        .map(|h| calendar::elapsed_days(h.created_date(), today))
        .fold(0u32, u32::saturating_add)
}

/// Lifetime numbers for one habit from its completion dates in any order
pub fn habit_stat(habit: &Habit, dates: &[NaiveDate], today: NaiveDate) -> HabitStat {
    let distinct: HashSet<&NaiveDate> = dates.iter().collect();
    let completed_days = to_u32(distinct.len());
    let total_days = calendar::elapsed_days(habit.created_date(), today);
    let streak = StreakSummary::from_dates(dates, today);

    HabitStat {
        habit_id: habit.id.clone(),
        name: habit.name.clone(),
        completed_days,
        total_days,
        completion_rate: percentage(completed_days, total_days).min(100.0),
        current_streak: streak.current,
        best_streak: streak.best,
    }
}
