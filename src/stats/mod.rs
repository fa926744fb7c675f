/// Statistics over habits and their completions
///
/// The aggregator holds the pure calculations; the service wires them to a
/// storage backend and a reference date. Everything here is derived on
/// demand and never written back.

pub mod aggregator;
pub mod service;

pub use aggregator::*;
pub use service::*;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::HabitId;

/// Completion ratio for one day, or for one week in weekly series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyStat {
    /// The day, or the Monday that starts the week
    pub date: NaiveDate,
    pub completed: u32,
    pub total: u32,
}

impl DailyStat {
    /// Completion percentage, 0 when nothing was due
    pub fn rate(&self) -> f64 {
        percentage(self.completed, self.total)
    }
}

/// Lifetime numbers for one habit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitStat {
    pub habit_id: HabitId,
    pub name: String,
    /// Distinct days with at least one completion
    pub completed_days: u32,
    /// Days since creation, both ends included
    pub total_days: u32,
    pub completion_rate: f64,
    pub current_streak: u32,
    pub best_streak: u32,
}

/// Totals across every active habit plus the trend series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub total_habits: u32,
    pub total_completions: u32,
    pub total_possible: u32,
    pub completion_rate: f64,
    /// Longest current streak of any habit
    pub best_current_streak: u32,
    /// Longest streak any habit ever had
    pub best_streak: u32,
    pub daily: Vec<DailyStat>,
    pub weekly: Vec<DailyStat>,
}

/// `part / whole` as a percentage, 0 for an empty whole
pub fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(whole) * 100.0
    }
}
