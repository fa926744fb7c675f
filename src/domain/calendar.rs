/// Calendar helpers shared by the frequency policy, streaks and aggregation
///
/// Every computation is anchored on a local calendar date. Callers pass
/// `today` explicitly so results are reproducible; `local_today` is the only
/// place that reads the clock.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, Utc};

/// The current date on the local clock
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Local calendar date of a stored UTC instant
pub fn local_date(instant: &DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&Local).date_naive()
}

/// Monday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Sunday closing the week that contains `date`
pub fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date) + Duration::days(6)
}

/// Days from `start` to `today`, counting both ends. Zero when `start` is
/// after `today`.
pub fn elapsed_days(start: NaiveDate, today: NaiveDate) -> u32 {
    let days = (today - start).num_days() + 1;
    u32::try_from(days.max(0)).unwrap_or(u32::MAX)
}
