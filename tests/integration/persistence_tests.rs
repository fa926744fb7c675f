/// Data written through one tracker survives reopening the database
use hbt::tools::*;
use hbt::*;
use tempfile::{tempdir, NamedTempFile};

#[cfg(test)]
mod persistence_integration_tests {
    use super::*;

    #[test]
    fn test_habits_and_completions_survive_reopen() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();

        {
            let tracker = HabitTracker::open(db_path.clone()).expect("Failed to open tracker");
            let storage = tracker.storage();

            create_category(
                storage,
                CreateCategoryParams {
                    name: "Health".to_string(),
                    ..Default::default()
                },
            )
            .unwrap();
            create_habit(
                storage,
                CreateHabitParams {
                    name: "Run".to_string(),
                    category: Some("health".to_string()),
                    frequency: Some("3x".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
            toggle_habit(storage, ToggleHabitParams { habit: "run".to_string() }).unwrap();
            set_config(
                storage,
                SetConfigParams {
                    key: "trend_weeks".to_string(),
                    value: "4".to_string(),
                },
            )
            .unwrap();
        }

        let tracker = HabitTracker::open(db_path).expect("Failed to reopen tracker");

        let listed = list_habits(tracker.storage(), ListHabitsParams::default()).unwrap();
        assert_eq!(listed.habits.len(), 1);
        let run = &listed.habits[0];
        assert_eq!(run.frequency, Frequency::TimesPerWeek(3));
        assert_eq!(run.total_completions, 1);
        assert_eq!(run.category.as_ref().map(|c| c.name.as_str()), Some("Health"));

        let status = tracker.stats().today_status().unwrap();
        assert!(status[0].completed_today);
        assert_eq!(status[0].completions_this_week, 1);
        assert!(status[0].is_due);

        assert_eq!(tracker.settings().unwrap().trend_weeks, 4);
    }

    #[test]
    fn test_open_creates_database_in_new_directory() {
        let dir = tempdir().expect("Failed to create temp dir");
        let db_path = dir.path().join("habits.db");

        let tracker = HabitTracker::open(db_path.clone()).expect("Failed to open tracker");
        assert!(tracker.storage().active_habits().unwrap().is_empty());
        assert!(db_path.exists());

        // Reopening runs migrations against an up-to-date schema
        HabitTracker::open(db_path).expect("Failed to reopen tracker");
    }

    #[test]
    fn test_delete_cascades_to_completions() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let tracker = HabitTracker::open(temp_file.path().to_path_buf()).unwrap();
        let storage = tracker.storage();

        let habit = create_habit(
            storage,
            CreateHabitParams {
                name: "Read".to_string(),
                ..Default::default()
            },
        )
        .unwrap()
        .habit;
        toggle_habit(storage, ToggleHabitParams { habit: "Read".to_string() }).unwrap();

        delete_habit(storage, HabitRefParams { habit: "Read".to_string() }).unwrap();

        assert!(storage.get_habit(&habit.id).unwrap_err().is_not_found());
        assert_eq!(storage.count_completions(&habit.id).unwrap(), 0);
    }
}
