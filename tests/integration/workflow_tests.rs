/// End-to-end tracking workflows through the tools and statistics service
use chrono::{Duration, Local, NaiveDate, Utc};
use hbt::tools::*;
use hbt::*;

fn fixed_today() -> NaiveDate {
    // a Sunday
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

/// Habit created at local noon `days` days before the fixed today
fn habit_created_days_before(name: &str, frequency: Frequency, days: i64) -> Habit {
    let created = fixed_today() - Duration::days(days);
    let created_at = created
        .and_hms_opt(12, 0, 0)
        .unwrap()
        .and_local_timezone(Local)
        .single()
        .unwrap()
        .with_timezone(&Utc);
    Habit::from_existing(
        HabitId::new(),
        name.to_string(),
        None,
        None,
        None,
        frequency,
        1,
        created_at,
        None,
    )
}

#[cfg(test)]
mod workflow_integration_tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_state() {
        let tracker = HabitTracker::in_memory().unwrap();
        let storage = tracker.storage();
        create_habit(
            storage,
            CreateHabitParams {
                name: "Meditate".to_string(),
                ..Default::default()
            },
        )
        .unwrap();

        let on = toggle_habit(storage, ToggleHabitParams { habit: "meditate".to_string() }).unwrap();
        assert!(on.completed);
        assert_eq!(on.current_streak, 1);

        let off = toggle_habit(storage, ToggleHabitParams { habit: "meditate".to_string() }).unwrap();
        assert!(!off.completed);
        assert_eq!(off.completions_today, 0);
        assert_eq!(off.current_streak, 0);

        let status = today_status(storage, TodayStatusParams::default()).unwrap();
        assert_eq!(status.completed, 0);
    }

    #[test]
    fn test_backdated_completions_build_streak() {
        let tracker = HabitTracker::in_memory().unwrap();
        let storage = tracker.storage();
        create_habit(
            storage,
            CreateHabitParams {
                name: "Read".to_string(),
                target_per_day: Some(2),
                ..Default::default()
            },
        )
        .unwrap();

        let yesterday = tracker.stats().today() - Duration::days(1);
        let logged = complete_habit(
            storage,
            CompleteHabitParams {
                habit: "Read".to_string(),
                date: Some(yesterday.format("%Y-%m-%d").to_string()),
                notes: Some("chapter 3".to_string()),
            },
        )
        .unwrap();
        assert_eq!(logged.current_streak, 1);

        let today = complete_habit(
            storage,
            CompleteHabitParams {
                habit: "Read".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(today.current_streak, 2);
        assert!(today.message.contains("1/2 of the daily target"));

        let tomorrow = tracker.stats().today() + Duration::days(1);
        let future = complete_habit(
            storage,
            CompleteHabitParams {
                habit: "Read".to_string(),
                date: Some(tomorrow.format("%Y-%m-%d").to_string()),
                notes: None,
            },
        );
        assert!(matches!(future, Err(TrackerError::Domain(_))));
    }

    #[test]
    fn test_weekly_trend_counts_all_frequencies_against_daily_slots() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let read = habit_created_days_before("Read", Frequency::Daily, 30);
        let gym = habit_created_days_before("Gym", Frequency::Weekly, 30);
        storage.create_habit(&read).unwrap();
        storage.create_habit(&gym).unwrap();
        assert_eq!(read.created_date(), fixed_today() - Duration::days(30));
        assert_eq!(storage.get_habit(&gym.id).unwrap().created_date(), gym.created_date());

        let stats = StatsService::with_today(&storage, fixed_today());
        stats.record_completion(&read.id, fixed_today(), None).unwrap();
        stats
            .record_completion(&gym.id, fixed_today() - Duration::days(4), None)
            .unwrap();

        let overview = stats.overview(7, 2).unwrap();

        let this_week = overview.weekly.last().unwrap();
        assert_eq!(this_week.date, NaiveDate::from_ymd_opt(2026, 10, 12).unwrap());
        assert_eq!((this_week.completed, this_week.total), (2, 7));

        // the daily trend only tracks daily habits
        let today = overview.daily.last().unwrap();
        assert_eq!((today.completed, today.total), (1, 1));
        let thursday = &overview.daily[overview.daily.len() - 4];
        assert_eq!((thursday.completed, thursday.total), (0, 1));

        assert_eq!(overview.total_habits, 2);
        assert_eq!(overview.total_completions, 2);
        assert_eq!(overview.total_possible, 31);
    }

    #[test]
    fn test_archived_habits_drop_out_of_statistics() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let read = habit_created_days_before("Read", Frequency::Daily, 3);
        storage.create_habit(&read).unwrap();

        let stats = StatsService::with_today(&storage, fixed_today());
        stats.record_completion(&read.id, fixed_today(), None).unwrap();
        storage.set_archived(&read.id, true).unwrap();

        let overview = stats.overview(7, 1).unwrap();
        assert_eq!(overview.total_habits, 0);
        assert_eq!(overview.total_possible, 0);
        assert_eq!(overview.completion_rate, 0.0);
        assert!(overview.daily.iter().all(|d| d.total == 0 && d.rate() == 0.0));
        assert_eq!(overview.weekly[0].completed, 0);

        assert!(stats.today_status().unwrap().is_empty());
        // streaks of archived habits are still available on request
        assert_eq!(stats.streak_for(&read.id).unwrap().current, 1);
    }

    #[test]
    fn test_weekly_habit_due_until_done_this_week() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let gym = habit_created_days_before("Gym", Frequency::TimesPerWeek(2), 10);
        storage.create_habit(&gym).unwrap();

        let stats = StatsService::with_today(&storage, fixed_today());
        // last week's record does not count towards this week
        stats
            .record_completion(&gym.id, fixed_today() - Duration::days(7), None)
            .unwrap();
        stats
            .record_completion(&gym.id, fixed_today() - Duration::days(1), None)
            .unwrap();
        assert!(stats.today_status().unwrap()[0].is_due);

        stats.record_completion(&gym.id, fixed_today(), None).unwrap();
        let status = &stats.today_status().unwrap()[0];
        assert_eq!(status.completions_this_week, 2);
        assert!(!status.is_due);
        assert!(status.completed_today);
    }

    #[test]
    fn test_unknown_habit_surfaces_not_found() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let stats = StatsService::with_today(&storage, fixed_today());
        let missing = HabitId::new();

        assert!(stats.toggle_completion(&missing).unwrap_err().is_not_found());
        assert!(stats.streak_for(&missing).unwrap_err().is_not_found());
        assert!(toggle_habit(&storage, ToggleHabitParams { habit: "ghost".to_string() })
            .unwrap_err()
            .is_not_found());
    }
}
