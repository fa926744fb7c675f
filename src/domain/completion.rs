/// Completion records for habits
///
/// A Completion is one record of a habit being done on a calendar date.
/// Several completions may share a date; that is how a habit with a
/// target-per-day above one accumulates progress.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use crate::domain::{CompletionId, DomainError, HabitId};

/// A record of completing a habit on a specific day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    /// Unique identifier for this record
    pub id: CompletionId,
    /// Which habit this completion is for
    pub habit_id: HabitId,
    /// Which day this completion counts for
    pub completed_on: NaiveDate,
    /// When the record was written; orders records sharing a day
    pub logged_at: DateTime<Utc>,
    /// User's note about this completion
    pub notes: Option<String>,
}

impl Completion {
    /// Create a new completion with validation
    ///
    /// `today` is the local date the caller considers current; completions
    /// may not be dated after it.
    pub fn new(
        habit_id: HabitId,
        completed_on: NaiveDate,
        notes: Option<String>,
        today: NaiveDate,
    ) -> Result<Self, DomainError> {
        Self::validate_completed_on(completed_on, today)?;
        let notes = notes.filter(|n| !n.trim().is_empty());
        Self::validate_notes(&notes)?;

        Ok(Self {
            id: CompletionId::new(),
            habit_id,
            completed_on,
            logged_at: Utc::now(),
            notes,
        })
    }

    /// Create a completion from existing data (used when loading from database)
    pub fn from_existing(
        id: CompletionId,
        habit_id: HabitId,
        completed_on: NaiveDate,
        logged_at: DateTime<Utc>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id,
            habit_id,
            completed_on,
            logged_at,
            notes,
        }
    }

    /// Check if this completion has a non-blank note
    pub fn has_notes(&self) -> bool {
        self.notes.as_deref().is_some_and(|n| !n.trim().is_empty())
    }

    // Validation helper methods

    fn validate_completed_on(date: NaiveDate, today: NaiveDate) -> Result<(), DomainError> {
        if date > today {
            return Err(DomainError::InvalidDate(
                "Cannot record completions for future dates".to_string()
            ));
        }
        Ok(())
    }

    fn validate_notes(notes: &Option<String>) -> Result<(), DomainError> {
        if let Some(note_text) = notes {
            if note_text.chars().count() > 500 {
                return Err(DomainError::InvalidValue {
                    message: "Notes cannot be longer than 500 characters".to_string()
                });
            }
        }
        Ok(())
    }
}
