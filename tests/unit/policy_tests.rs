/// Frequency policy, calendar and entity validation
use chrono::{Datelike, NaiveDate, Weekday};
use hbt::calendar::{elapsed_days, week_end, week_start};
use hbt::tools::parse_frequency;
use hbt::*;

#[cfg(test)]
mod policy_unit_tests {
    use super::*;

    #[test]
    fn test_due_policy() {
        assert!(Frequency::Daily.is_due(0));
        assert!(Frequency::Daily.is_due(5));

        assert!(Frequency::Weekly.is_due(0));
        assert!(!Frequency::Weekly.is_due(1));

        let three = Frequency::TimesPerWeek(3);
        assert!((0..3).all(|n| three.is_due(n)));
        assert!(!three.is_due(3));
        assert!(!three.is_due(7));

        assert!(Frequency::Unrecognized("fortnightly".to_string()).is_due(10));
    }

    #[test]
    fn test_frequency_strings() {
        assert_eq!(parse_frequency("daily").unwrap(), Frequency::Daily);
        assert_eq!(parse_frequency("W").unwrap(), Frequency::Weekly);
        assert_eq!(parse_frequency("3x").unwrap(), Frequency::TimesPerWeek(3));
        assert_eq!(parse_frequency("4/week").unwrap(), Frequency::TimesPerWeek(4));
        assert_eq!(
            parse_frequency("times_per_week:2").unwrap(),
            Frequency::TimesPerWeek(2)
        );
        assert!(parse_frequency("0x").is_err());
        assert!(parse_frequency("8x").is_err());
        assert!(parse_frequency("hourly").is_err());
    }

    #[test]
    fn test_weeks_start_on_monday() {
        let sunday = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(week_start(sunday).weekday(), Weekday::Mon);
        assert_eq!(week_start(sunday), NaiveDate::from_ymd_opt(2026, 10, 12).unwrap());
        assert_eq!(week_end(sunday), sunday);

        let monday = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(week_start(monday), monday);
    }

    #[test]
    fn test_elapsed_days_counts_both_ends() {
        let start = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        assert_eq!(elapsed_days(start, start), 1);
        assert_eq!(elapsed_days(start, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()), 18);
        assert_eq!(elapsed_days(NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(), start), 0);
    }

    #[test]
    fn test_habit_validation() {
        let habit = Habit::new("  Read  ".to_string(), None, None, Frequency::Daily, 1).unwrap();
        assert_eq!(habit.name, "Read");
        assert!(!habit.is_archived());

        assert!(Habit::new(" ".to_string(), None, None, Frequency::Daily, 1).is_err());
        assert!(Habit::new("Gym".to_string(), None, None, Frequency::TimesPerWeek(9), 1).is_err());
        assert!(Habit::new("Gym".to_string(), None, None, Frequency::Daily, 0).is_err());
    }

    #[test]
    fn test_completion_cannot_be_in_the_future() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let habit_id = HabitId::new();

        let completion = Completion::new(habit_id.clone(), today, Some("  ".to_string()), today).unwrap();
        assert!(!completion.has_notes());

        let tomorrow = today.succ_opt().unwrap();
        assert!(Completion::new(habit_id, tomorrow, None, today).is_err());
    }

    #[test]
    fn test_settings_defaults_and_validation() {
        let settings = Settings::from_pairs(&Default::default());
        assert_eq!(settings.trend_days, 14);
        assert_eq!(settings.trend_weeks, 8);

        assert!(Settings::validate("trend_days", "30").is_ok());
        assert!(Settings::validate("trend_days", "0").is_err());
        assert!(Settings::validate("colour", "red").is_err());
    }
}
