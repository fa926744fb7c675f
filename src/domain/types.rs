/// Core types and enums used throughout the domain layer
///
/// This module defines the ID newtypes and the Frequency policy that decides
/// whether a habit needs attention in the current period.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Unique identifier for a habit
///
/// This is a wrapper around UUID to provide type safety - you can't accidentally
/// pass a habit ID where a completion ID is expected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HabitId(pub Uuid);

impl HabitId {
    /// Generate a new random habit ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a habit ID from a string (useful for database loading)
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// First eight hex digits, enough to tell habits apart on screen
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a single completion record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompletionId(pub Uuid);

impl CompletionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for CompletionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CompletionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub Uuid);

impl CategoryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for CategoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How often a habit should be performed
///
/// Weekly and TimesPerWeek habits count completions over the Monday-start
/// calendar week; Daily habits treat every day as its own period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Frequency {
    /// Every single day
    Daily,
    /// Once per calendar week
    Weekly,
    /// A specific number of times per calendar week (1-7)
    TimesPerWeek(u8),
    /// A frequency type found in storage that this build does not know.
    /// Never constructed through validation; always due.
    Unrecognized(String),
}

impl Frequency {
    pub const DAILY: &'static str = "daily";
    pub const WEEKLY: &'static str = "weekly";
    pub const TIMES_PER_WEEK: &'static str = "times_per_week";

    /// Validate that a frequency value is reasonable
    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            Frequency::TimesPerWeek(times) => {
                if *times == 0 || *times > 7 {
                    return Err(DomainError::InvalidFrequency(
                        format!("Times per week must be 1-7, got {}", times)
                    ));
                }
            }
            Frequency::Unrecognized(raw) => {
                return Err(DomainError::InvalidFrequency(
                    format!("Unknown frequency type '{}'", raw)
                ));
            }
            Frequency::Daily | Frequency::Weekly => {}
        }
        Ok(())
    }

    /// Decide whether the habit still needs attention in the current period.
    ///
    /// `completions_this_period` must already be counted over the period
    /// this frequency uses (the current Monday-start week for Weekly and
    /// TimesPerWeek). Daily habits are always due: completing one today does
    /// not make today "not due".
    pub fn is_due(&self, completions_this_period: u32) -> bool {
        match self {
            Frequency::Daily => true,
            Frequency::Weekly => completions_this_period == 0,
            Frequency::TimesPerWeek(times) => completions_this_period < u32::from(*times),
            Frequency::Unrecognized(_) => true,
        }
    }

    pub fn is_daily(&self) -> bool {
        matches!(self, Frequency::Daily)
    }

    /// Split into the (type, value) pair stored in the habits table
    pub fn to_parts(&self) -> (&str, u8) {
        match self {
            Frequency::Daily => (Self::DAILY, 1),
            Frequency::Weekly => (Self::WEEKLY, 1),
            Frequency::TimesPerWeek(times) => (Self::TIMES_PER_WEEK, *times),
            Frequency::Unrecognized(raw) => (raw.as_str(), 1),
        }
    }

    /// Rebuild from the stored (type, value) pair. Unknown types are kept
    /// rather than rejected so an old or foreign row never hides a habit.
    pub fn from_parts(kind: &str, value: u8) -> Self {
        match kind {
            Self::DAILY => Frequency::Daily,
            Self::WEEKLY => Frequency::Weekly,
            Self::TIMES_PER_WEEK => Frequency::TimesPerWeek(value),
            other => Frequency::Unrecognized(other.to_string()),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::TimesPerWeek(times) => write!(f, "{}x/week", times),
            Frequency::Unrecognized(raw) => write!(f, "{} (unknown)", raw),
        }
    }
}
