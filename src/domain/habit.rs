/// Habit entity and related functionality
///
/// This module defines the core Habit struct that represents a user's habit
/// they want to track, along with validation and lifecycle helpers.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use crate::domain::{calendar, CategoryId, DomainError, Frequency, HabitId};

/// Upper bound for completions required in a single day
pub const MAX_TARGET_PER_DAY: u32 = 100;

/// A habit represents something the user wants to do regularly
///
/// Each habit has a name, a frequency policy and a per-day target. Category
/// details are not embedded here; they are looked up by `category_id` when a
/// view needs them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display name (e.g., "Morning Run", "Read for 30min")
    pub name: String,
    /// Optional detailed description
    pub description: Option<String>,
    /// Optional emoji shown next to the name
    pub emoji: Option<String>,
    /// Category this habit is filed under, if any
    pub category_id: Option<CategoryId>,
    /// How often this habit should be performed
    pub frequency: Frequency,
    /// Completions needed in one day for the day to count as done
    pub target_per_day: u32,
    /// When this habit was created
    pub created_at: DateTime<Utc>,
    /// When this habit was archived (None while active)
    pub archived_at: Option<DateTime<Utc>>,
}

impl Habit {
    /// Create a new habit with validation
    ///
    /// This is the main constructor that validates all fields and returns
    /// an error if any validation fails.
    pub fn new(
        name: String,
        description: Option<String>,
        category_id: Option<CategoryId>,
        frequency: Frequency,
        target_per_day: u32,
    ) -> Result<Self, DomainError> {
        let name = name.trim().to_string();
        Self::validate_name(&name)?;
        Self::validate_description(&description)?;
        frequency.validate()?;
        Self::validate_target_per_day(target_per_day)?;

        Ok(Self {
            id: HabitId::new(),
            name,
            description,
            emoji: None,
            category_id,
            frequency,
            target_per_day,
            created_at: Utc::now(),
            archived_at: None,
        })
    }

    /// Create a habit from existing data (used when loading from database)
    ///
    /// This constructor assumes data is already validated and is mainly used
    /// by the storage layer when loading habits from the database.
    #[allow(clippy::too_many_arguments)]
    pub fn from_existing(
        id: HabitId,
        name: String,
        description: Option<String>,
        emoji: Option<String>,
        category_id: Option<CategoryId>,
        frequency: Frequency,
        target_per_day: u32,
        created_at: DateTime<Utc>,
        archived_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            emoji,
            category_id,
            frequency,
            target_per_day,
            created_at,
            archived_at,
        }
    }

    /// Attach an emoji, validating its length
    pub fn with_emoji(mut self, emoji: Option<String>) -> Result<Self, DomainError> {
        Self::validate_emoji(&emoji)?;
        self.emoji = emoji;
        Ok(self)
    }

    /// Update the habit's properties with validation
    ///
    /// Outer `None` leaves a field untouched; `Some(None)` clears an optional
    /// field. Nothing is applied unless every new value is valid.
    pub fn update(
        &mut self,
        name: Option<String>,
        description: Option<Option<String>>,
        emoji: Option<Option<String>>,
        category_id: Option<Option<CategoryId>>,
        frequency: Option<Frequency>,
        target_per_day: Option<u32>,
    ) -> Result<(), DomainError> {
        let name = name.map(|n| n.trim().to_string());
        if let Some(ref new_name) = name {
            Self::validate_name(new_name)?;
        }
        if let Some(ref new_desc) = description {
            Self::validate_description(new_desc)?;
        }
        if let Some(ref new_emoji) = emoji {
            Self::validate_emoji(new_emoji)?;
        }
        if let Some(ref new_freq) = frequency {
            new_freq.validate()?;
        }
        if let Some(target) = target_per_day {
            Self::validate_target_per_day(target)?;
        }

        if let Some(new_name) = name {
            self.name = new_name;
        }
        if let Some(new_description) = description {
            self.description = new_description;
        }
        if let Some(new_emoji) = emoji {
            self.emoji = new_emoji;
        }
        if let Some(new_category) = category_id {
            self.category_id = new_category;
        }
        if let Some(new_frequency) = frequency {
            self.frequency = new_frequency;
        }
        if let Some(target) = target_per_day {
            self.target_per_day = target;
        }

        Ok(())
    }

    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }

    /// Local calendar date the habit was created on
    pub fn created_date(&self) -> NaiveDate {
        calendar::local_date(&self.created_at)
    }

    /// Whether the habit existed (was created on or before) `date`
    pub fn existed_on(&self, date: NaiveDate) -> bool {
        self.created_date() <= date
    }

    /// Frequency policy applied to this habit's period count
    pub fn is_due(&self, completions_this_period: u32) -> bool {
        self.frequency.is_due(completions_this_period)
    }

    /// Name prefixed by the emoji when one is set
    pub fn display_name(&self) -> String {
        match self.emoji.as_deref() {
            Some(emoji) if !emoji.trim().is_empty() => format!("{} {}", emoji, self.name),
            _ => self.name.clone(),
        }
    }

    // Validation helper methods

    /// Validate habit name according to business rules
    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string()
            ));
        }

        if trimmed.chars().count() > 100 {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be longer than 100 characters".to_string()
            ));
        }

        Ok(())
    }

    /// Validate optional description
    fn validate_description(description: &Option<String>) -> Result<(), DomainError> {
        if let Some(desc) = description {
            if desc.chars().count() > 500 {
                return Err(DomainError::Validation {
                    message: "Description cannot be longer than 500 characters".to_string()
                });
            }
        }
        Ok(())
    }

    fn validate_emoji(emoji: &Option<String>) -> Result<(), DomainError> {
        if let Some(e) = emoji {
            if e.chars().count() > 8 {
                return Err(DomainError::InvalidValue {
                    message: "Emoji cannot be longer than 8 characters".to_string()
                });
            }
        }
        Ok(())
    }

    fn validate_target_per_day(target: u32) -> Result<(), DomainError> {
        if target == 0 {
            return Err(DomainError::InvalidValue {
                message: "Target per day must be at least 1".to_string()
            });
        }
        if target > MAX_TARGET_PER_DAY {
            return Err(DomainError::InvalidValue {
                message: format!("Target per day cannot exceed {}", MAX_TARGET_PER_DAY)
            });
        }
        Ok(())
    }
}
