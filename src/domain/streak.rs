/// Streak calculation
///
/// A streak is a run of consecutive calendar days with at least one
/// completion. Several completions on one day count once. Both calculations
/// are pure over their input and recomputed from the store on every query.

use serde::{Deserialize, Serialize};
use chrono::{Duration, NaiveDate};

/// Current and best streak for one habit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    /// Consecutive days ending today or yesterday
    pub current: u32,
    /// Longest run of consecutive days anywhere in the history
    pub best: u32,
}

impl StreakSummary {
    /// Calculate both streaks from completion dates in any order.
    ///
    /// Duplicate dates are allowed and counted once.
    pub fn from_dates(dates: &[NaiveDate], today: NaiveDate) -> Self {
        let mut oldest_first = dates.to_vec();
        oldest_first.sort_unstable();

        let best = best_streak(&oldest_first);

        oldest_first.reverse();
        let current = current_streak(&oldest_first, today);

        Self { current, best }
    }
}

/// Length of the run of days ending at the most recent completion.
///
/// `newest_first` must be sorted in descending order. The run only counts
/// when the most recent completion is today or yesterday; otherwise the
/// streak is considered broken and the result is 0.
pub fn current_streak(newest_first: &[NaiveDate], today: NaiveDate) -> u32 {
    let Some((&latest, rest)) = newest_first.split_first() else {
        return 0;
    };

    let yesterday = today - Duration::days(1);
    if latest != today && latest != yesterday {
        return 0;
    }

    let mut streak = 1;
    let mut expected = latest - Duration::days(1);

    for &date in rest {
        if date == expected {
            streak += 1;
            expected = expected - Duration::days(1);
        } else if date < expected {
            // Gap found, streak broken
            break;
        }
        // date > expected: another record for a day already counted
    }

    streak
}

/// Longest run of consecutive days in the whole history.
///
/// `oldest_first` must be sorted in ascending order. Returns 0 only when
/// there are no dates.
pub fn best_streak(oldest_first: &[NaiveDate]) -> u32 {
    let Some((&first, rest)) = oldest_first.split_first() else {
        return 0;
    };

    let mut best = 0;
    let mut current_run = 1;
    let mut last_date = first;

    for &date in rest {
        let days_diff = (date - last_date).num_days();

        if days_diff == 1 {
            current_run += 1;
        } else if days_diff > 1 {
            best = best.max(current_run);
            current_run = 1;
        }
        // days_diff == 0 is a duplicate day

        last_date = date;
    }

    best.max(current_run)
}
