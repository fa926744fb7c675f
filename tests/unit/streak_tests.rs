/// Streak calculator scenarios and properties
use chrono::{Duration, NaiveDate};
use hbt::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn days_ago(n: i64) -> NaiveDate {
    today() - Duration::days(n)
}

fn summary(dates: &[NaiveDate]) -> StreakSummary {
    StreakSummary::from_dates(dates, today())
}

#[cfg(test)]
mod streak_unit_tests {
    use super::*;

    #[test]
    fn test_no_completions() {
        assert_eq!(summary(&[]), StreakSummary { current: 0, best: 0 });
    }

    #[test]
    fn test_run_ending_today() {
        let s = summary(&[days_ago(0), days_ago(1), days_ago(2)]);
        assert_eq!(s.current, 3);
        assert_eq!(s.best, 3);
    }

    #[test]
    fn test_gap_after_today_breaks_run() {
        assert_eq!(summary(&[days_ago(0), days_ago(2)]).current, 1);
    }

    #[test]
    fn test_run_older_than_yesterday_is_broken() {
        let s = summary(&[days_ago(3), days_ago(2)]);
        assert_eq!(s.current, 0);
        assert_eq!(s.best, 2);
    }

    #[test]
    fn test_run_may_end_yesterday() {
        assert_eq!(summary(&[days_ago(1), days_ago(2)]).current, 2);
    }

    #[test]
    fn test_same_day_duplicates_count_once() {
        let s = summary(&[days_ago(0), days_ago(0), days_ago(1)]);
        assert_eq!(s.current, 2);
        assert_eq!(s.best, 2);
    }

    #[test]
    fn test_best_picks_longest_run() {
        let mut dates = vec![days_ago(20), days_ago(19)];
        dates.extend((10..15).map(days_ago));
        assert_eq!(summary(&dates).best, 5);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let forward = [days_ago(4), days_ago(1), days_ago(0), days_ago(5)];
        let mut backward = forward;
        backward.reverse();
        assert_eq!(summary(&forward), summary(&backward));
    }

    #[test]
    fn test_current_never_exceeds_best() {
        // every subset of the last six days
        for mask in 0u32..64 {
            let dates: Vec<NaiveDate> = (0..6)
                .filter(|bit| mask & (1 << bit) != 0)
                .map(|bit| days_ago(i64::from(bit)))
                .collect();
            let s = summary(&dates);
            assert!(s.current <= s.best, "mask {:06b}: {:?}", mask, s);
            assert_eq!(s, summary(&dates));
        }
    }
}
