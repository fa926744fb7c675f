/// User preferences persisted in the settings table
///
/// Settings are read once at startup and handed to the front ends; the
/// statistics core never reads them.

use std::collections::BTreeMap;

use serde::Serialize;
use crate::domain::DomainError;

pub const KEY_THEME: &str = "theme";
pub const KEY_TREND_DAYS: &str = "trend_days";
pub const KEY_TREND_WEEKS: &str = "trend_weeks";

pub const KNOWN_KEYS: [&str; 3] = [KEY_THEME, KEY_TREND_DAYS, KEY_TREND_WEEKS];

/// Longest daily trend, in days
pub const MAX_TREND_DAYS: u32 = 365;
/// Longest weekly trend, in weeks
pub const MAX_TREND_WEEKS: u32 = 104;

/// Typed view over the raw key/value pairs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub theme: String,
    /// Days shown in the daily trend
    pub trend_days: u32,
    /// Weeks shown in the weekly trend
    pub trend_weeks: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            trend_days: 14,
            trend_weeks: 8,
        }
    }
}

impl Settings {
    /// Build from stored pairs. Missing or unparsable values fall back to
    /// defaults; stored values were validated on write.
    pub fn from_pairs(pairs: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        Self {
            theme: pairs.get(KEY_THEME).cloned().unwrap_or(defaults.theme),
            trend_days: pairs
                .get(KEY_TREND_DAYS)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.trend_days),
            trend_weeks: pairs
                .get(KEY_TREND_WEEKS)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.trend_weeks),
        }
    }

    /// Effective value of every known key
    pub fn to_pairs(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (KEY_THEME.to_string(), self.theme.clone()),
            (KEY_TREND_DAYS.to_string(), self.trend_days.to_string()),
            (KEY_TREND_WEEKS.to_string(), self.trend_weeks.to_string()),
        ])
    }

    /// Check a key/value pair before it is written
    pub fn validate(key: &str, value: &str) -> Result<(), DomainError> {
        match key {
            KEY_THEME => {
                if value.trim().is_empty() {
                    return Err(DomainError::InvalidValue {
                        message: "Theme cannot be empty".to_string()
                    });
                }
            }
            KEY_TREND_DAYS => Self::validate_range(key, value, 1, MAX_TREND_DAYS)?,
            KEY_TREND_WEEKS => Self::validate_range(key, value, 1, MAX_TREND_WEEKS)?,
            _ => {
                return Err(DomainError::Validation {
                    message: format!(
                        "Unknown setting '{}', expected one of: {}",
                        key,
                        KNOWN_KEYS.join(", ")
                    )
                });
            }
        }
        Ok(())
    }

    fn validate_range(key: &str, value: &str, min: u32, max: u32) -> Result<(), DomainError> {
        match value.trim().parse::<u32>() {
            Ok(n) if (min..=max).contains(&n) => Ok(()),
            _ => Err(DomainError::InvalidValue {
                message: format!("{} must be a whole number between {} and {}", key, min, max)
            }),
        }
    }
}
