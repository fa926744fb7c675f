/// Tools for completion statistics
///
/// This module implements stats_overview (totals plus daily and weekly
/// trends) and habit_stats (lifetime numbers per habit), rendered with the
/// text charts.

use serde::{Deserialize, Serialize};
use crate::domain::settings::{KEY_TREND_DAYS, KEY_TREND_WEEKS};
use crate::domain::Settings;
use crate::stats::{HabitStat, Overview, StatsService};
use crate::storage::HabitStorage;
use crate::tools::chart::{BarChart, Sparkline};
use crate::tools::plural;
use crate::TrackerError;

const SPARKLINE_WIDTH: usize = 40;
const CHART_WIDTH: usize = 50;
/// Most recent days shown as bars below the sparkline
const RECENT_DAYS: usize = 7;

/// Parameters for the statistics overview
#[derive(Debug, Default, Deserialize)]
pub struct StatsOverviewParams {
    /// Days in the daily trend, defaults to the `trend_days` setting
    pub days: Option<u32>,
    /// Weeks in the weekly trend, defaults to the `trend_weeks` setting
    pub weeks: Option<u32>,
}

/// Response with the statistics overview
#[derive(Debug, Serialize)]
pub struct StatsOverviewResponse {
    pub overview: Overview,
    pub message: String,
}

/// Parameters for per-habit statistics (none yet)
#[derive(Debug, Default, Deserialize)]
pub struct HabitStatsParams {}

/// Response with per-habit statistics
#[derive(Debug, Serialize)]
pub struct HabitStatsResponse {
    pub habits: Vec<HabitStat>,
    pub message: String,
}

/// Overall totals with daily and weekly completion trends
pub fn stats_overview<S: HabitStorage>(
    storage: &S,
    params: StatsOverviewParams,
) -> Result<StatsOverviewResponse, TrackerError> {
    let settings = Settings::from_pairs(&storage.all_settings()?);

    let days = params.days.unwrap_or(settings.trend_days);
    Settings::validate(KEY_TREND_DAYS, &days.to_string())?;
    let weeks = params.weeks.unwrap_or(settings.trend_weeks);
    Settings::validate(KEY_TREND_WEEKS, &weeks.to_string())?;

    let overview = StatsService::new(storage).overview(days, weeks)?;
    let message = format_overview(&overview);

    Ok(StatsOverviewResponse { overview, message })
}

/// Lifetime numbers for every active habit
pub fn habit_stats<S: HabitStorage>(
    storage: &S,
    _params: HabitStatsParams,
) -> Result<HabitStatsResponse, TrackerError> {
    let habits = StatsService::new(storage).habit_stats()?;

    let message = if habits.is_empty() {
        "No habits yet.".to_string()
    } else {
        let chart = BarChart::new(CHART_WIDTH);
        habits
            .iter()
            .map(|stat| {
                format!(
                    "{}\n    Streak: {} (best: {}) | {}/{} days\n    {}",
                    stat.name,
                    stat.current_streak,
                    stat.best_streak,
                    stat.completed_days,
                    stat.total_days,
                    chart.render(stat.completion_rate, "")
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    Ok(HabitStatsResponse { habits, message })
}

fn format_overview(overview: &Overview) -> String {
    let mut s = String::from("Summary\n");
    s.push_str(&format!("  Total habits: {}\n", overview.total_habits));
    s.push_str(&format!("  Total completions: {}\n", overview.total_completions));
    s.push_str(&format!("  Overall rate: {:.1}%\n", overview.completion_rate));
    s.push_str(&format!(
        "  Current best streak: {}\n",
        plural(overview.best_current_streak, "day")
    ));
    s.push_str(&format!("  All-time best streak: {}\n", plural(overview.best_streak, "day")));

    let chart = BarChart::new(CHART_WIDTH);

    s.push_str(&format!("\nLast {}\n", plural(overview.daily.len() as u32, "Day")));
    let rates: Vec<f64> = overview.daily.iter().map(|d| d.rate()).collect();
    s.push_str(&format!("  {}\n\n", Sparkline::new(SPARKLINE_WIDTH).render(&rates)));
    for day in overview.daily.iter().rev().take(RECENT_DAYS) {
        let label = day.date.format("%a %m/%d").to_string();
        s.push_str(&format!("  {}\n", chart.render(day.rate(), &label)));
    }

    s.push_str(&format!("\nLast {}\n", plural(overview.weekly.len() as u32, "Week")));
    for week in overview.weekly.iter().rev() {
        let label = format!("Wk {}", week.date.format("%m/%d"));
        s.push_str(&format!("  {}\n", chart.render(week.rate(), &label)));
    }

    s.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Frequency, Habit};
    use crate::storage::SqliteStorage;
    use crate::tools::{toggle_habit, ToggleHabitParams};

    fn setup() -> SqliteStorage {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let habit = Habit::new("Read".to_string(), None, None, Frequency::Daily, 1).unwrap();
        storage.create_habit(&habit).unwrap();
        toggle_habit(&storage, ToggleHabitParams { habit: "Read".to_string() }).unwrap();
        storage
    }

    #[test]
    fn test_overview_uses_stored_trend_lengths() {
        let storage = setup();
        storage.set_setting(KEY_TREND_DAYS, "5").unwrap();

        let response = stats_overview(&storage, StatsOverviewParams::default()).unwrap();
        assert_eq!(response.overview.daily.len(), 5);
        assert_eq!(response.overview.weekly.len(), 8);
        assert_eq!(response.overview.total_completions, 1);
        assert_eq!(response.overview.completion_rate, 100.0);
        assert!(response.message.contains("Last 5 Days"));
        assert!(response.message.contains("Overall rate: 100.0%"));
    }

    #[test]
    fn test_overview_rejects_out_of_range_window() {
        let storage = setup();
        let params = StatsOverviewParams {
            days: Some(0),
            weeks: None,
        };
        assert!(matches!(
            stats_overview(&storage, params),
            Err(TrackerError::Domain(_))
        ));
    }

    #[test]
    fn test_habit_stats_message() {
        let storage = setup();
        let response = habit_stats(&storage, HabitStatsParams::default()).unwrap();

        assert_eq!(response.habits.len(), 1);
        assert_eq!(response.habits[0].completion_rate, 100.0);
        assert!(response.message.contains("Streak: 1 (best: 1)"));
        assert!(response.message.contains("100%"));
    }
}
