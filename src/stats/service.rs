/// Statistics facade
///
/// Composes the frequency policy, the streak calculator and the aggregator
/// over a storage backend into the read models the front ends display, plus
/// the two commands that change completions. Every call reads the store
/// fresh; the first storage error aborts the call.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::domain::settings::{MAX_TREND_DAYS, MAX_TREND_WEEKS};
use crate::domain::{
    calendar, CategoryId, CategoryView, Completion, Habit, HabitId, StreakSummary,
};
use crate::stats::{aggregator, percentage, HabitStat, Overview};
use crate::storage::HabitStorage;
use crate::TrackerError;

/// Where a habit stands today
#[derive(Debug, Clone, Serialize)]
pub struct HabitStatus {
    pub habit: Habit,
    pub category: Option<CategoryView>,
    pub completions_today: u32,
    /// Records in the current Monday-start week
    pub completions_this_week: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    pub is_due: bool,
    /// Today's records reached the habit's target
    pub completed_today: bool,
}

/// Read models and completion commands anchored on one calendar date
pub struct StatsService<'a, S: HabitStorage> {
    storage: &'a S,
    today: NaiveDate,
}

impl<'a, S: HabitStorage> StatsService<'a, S> {
    /// Service anchored on the local clock's current date
    pub fn new(storage: &'a S) -> Self {
        Self::with_today(storage, calendar::local_today())
    }

    /// Service anchored on a fixed date
    pub fn with_today(storage: &'a S, today: NaiveDate) -> Self {
        Self { storage, today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Status of every active habit, ordered by name
    pub fn today_status(&self) -> Result<Vec<HabitStatus>, TrackerError> {
        let habits = self.storage.active_habits()?;
        let categories = self.category_views()?;
        let week_start = calendar::week_start(self.today);

        let mut statuses = Vec::with_capacity(habits.len());
        for habit in habits {
            let completions_today = self.storage.count_completions_on(&habit.id, self.today)?;
            let completions_this_week = self.storage.count_completions_in_week(&habit.id, week_start)?;
            let streak = self.streak_summary(&habit.id)?;

            let category = habit
                .category_id
                .as_ref()
                .and_then(|id| categories.get(id).cloned());

            statuses.push(HabitStatus {
                is_due: habit.is_due(completions_this_week),
                completed_today: completions_today >= habit.target_per_day,
                category,
                completions_today,
                completions_this_week,
                current_streak: streak.current,
                best_streak: streak.best,
                habit,
            });
        }

        Ok(statuses)
    }

    /// Totals over active habits with a daily series of `days` days and a
    /// weekly series of `weeks` weeks, each clamped to the settings limits
    pub fn overview(&self, days: u32, weeks: u32) -> Result<Overview, TrackerError> {
        let days = days.clamp(1, MAX_TREND_DAYS);
        let weeks = weeks.clamp(1, MAX_TREND_WEEKS);
        let habits = self.storage.active_habits()?;

        let mut total_completions = 0u32;
        let mut best_current_streak = 0;
        let mut best_streak = 0;
        for habit in &habits {
            total_completions = total_completions.saturating_add(self.storage.count_completions(&habit.id)?);

            let streak = self.streak_summary(&habit.id)?;
            best_current_streak = best_current_streak.max(streak.current);
            best_streak = best_streak.max(streak.best);
        }

        let total_possible = aggregator::total_possible(&habits, self.today);

        let daily_start = self.today - Duration::days(i64::from(days) - 1);
        let weekly_start = calendar::week_start(self.today) - Duration::weeks(i64::from(weeks) - 1);
        let window = self
            .storage
            .completions_between(daily_start.min(weekly_start), calendar::week_end(self.today))?;

        tracing::debug!(
            "Overview over {} habits, {} completions in trend window",
            habits.len(),
            window.len()
        );

        Ok(Overview {
            total_habits: u32::try_from(habits.len()).unwrap_or(u32::MAX),
            total_completions,
            total_possible,
            completion_rate: percentage(total_completions, total_possible),
            best_current_streak,
            best_streak,
            daily: aggregator::daily_series(&habits, &window, self.today, days),
            weekly: aggregator::weekly_series(&habits, &window, self.today, weeks),
        })
    }

    /// Lifetime numbers for every active habit, ordered by name
    pub fn habit_stats(&self) -> Result<Vec<HabitStat>, TrackerError> {
        let habits = self.storage.active_habits()?;

        let mut stats = Vec::with_capacity(habits.len());
        for habit in &habits {
            let dates = self.storage.completion_dates_for(&habit.id)?;
            stats.push(aggregator::habit_stat(habit, &dates, self.today));
        }
        Ok(stats)
    }

    /// Current and best streak of one habit, archived or not
    pub fn streak_for(&self, habit_id: &HabitId) -> Result<StreakSummary, TrackerError> {
        self.storage.get_habit(habit_id)?;
        self.streak_summary(habit_id)
    }

    /// Flip today's state for a habit.
    ///
    /// With any record today, all of today's records are removed and the
    /// result is `false`. Otherwise one record is added and the result is
    /// `true`.
    pub fn toggle_completion(&self, habit_id: &HabitId) -> Result<bool, TrackerError> {
        let habit = self.storage.get_habit(habit_id)?;

        if self.storage.count_completions_on(habit_id, self.today)? > 0 {
            let removed = self.storage.remove_completions_on(habit_id, self.today)?;
            tracing::info!("Cleared {} completion(s) of '{}' for {}", removed, habit.name, self.today);
            return Ok(false);
        }

        let completion = Completion::new(habit.id.clone(), self.today, None, self.today)?;
        self.storage.add_completion(&completion)?;
        tracing::info!("Completed '{}' for {}", habit.name, self.today);
        Ok(true)
    }

    /// Append one record for `date`, which may not be after today
    pub fn record_completion(
        &self,
        habit_id: &HabitId,
        date: NaiveDate,
        notes: Option<String>,
    ) -> Result<Completion, TrackerError> {
        let habit = self.storage.get_habit(habit_id)?;

        let completion = Completion::new(habit.id.clone(), date, notes, self.today)?;
        self.storage.add_completion(&completion)?;
        tracing::info!("Recorded completion of '{}' for {}", habit.name, date);
        Ok(completion)
    }

    fn streak_summary(&self, habit_id: &HabitId) -> Result<StreakSummary, TrackerError> {
        let dates = self.storage.completion_dates_for(habit_id)?;
        Ok(StreakSummary::from_dates(&dates, self.today))
    }

    fn category_views(&self) -> Result<HashMap<CategoryId, CategoryView>, TrackerError> {
        Ok(self
            .storage
            .list_categories()?
            .iter()
            .map(|c| (c.id.clone(), CategoryView::from(c)))
            .collect())
    }
}
