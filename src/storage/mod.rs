/// Storage layer for persisting habit data
///
/// This module handles all database operations using SQLite. It is the
/// Completion Store the statistics core reads from, and also holds the
/// plain CRUD for habits, categories and settings.

pub mod sqlite;
pub mod migrations;

// Re-export the main storage types
pub use sqlite::*;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use thiserror::Error;
use crate::domain::{Category, CategoryId, Completion, Habit, HabitId};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: String },

    #[error("Category not found: {category_id}")]
    CategoryNotFound { category_id: String },

    #[error("Duplicate category name: {name}")]
    DuplicateCategory { name: String },

    #[error("Migration error: {0}")]
    Migration(String),
}

impl StorageError {
    /// True for the "no such record" family of errors
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StorageError::HabitNotFound { .. } | StorageError::CategoryNotFound { .. }
        )
    }
}

/// Trait defining the storage interface
///
/// Implementations must serialize their own reads and writes; callers treat
/// each method as an atomic read or write.
pub trait HabitStorage {
    // Habits

    /// Create a new habit
    fn create_habit(&self, habit: &Habit) -> Result<(), StorageError>;

    /// Get a habit by ID, archived or not
    fn get_habit(&self, habit_id: &HabitId) -> Result<Habit, StorageError>;

    /// Update an existing habit's editable fields
    fn update_habit(&self, habit: &Habit) -> Result<(), StorageError>;

    /// Set or clear the archive timestamp
    fn set_archived(&self, habit_id: &HabitId, archived: bool) -> Result<(), StorageError>;

    /// Permanently delete a habit and, by cascade, its completions
    fn delete_habit(&self, habit_id: &HabitId) -> Result<(), StorageError>;

    /// List habits ordered by name; archived ones last when included
    fn list_habits(&self, include_archived: bool) -> Result<Vec<Habit>, StorageError>;

    /// Non-archived habits ordered by name
    fn active_habits(&self) -> Result<Vec<Habit>, StorageError> {
        self.list_habits(false)
    }

    // Completions

    /// Append one completion record
    fn add_completion(&self, completion: &Completion) -> Result<(), StorageError>;

    /// Remove every completion of a habit on a date, returning how many went
    fn remove_completions_on(&self, habit_id: &HabitId, date: NaiveDate) -> Result<usize, StorageError>;

    /// All completion dates of a habit, oldest first, one per record
    fn completion_dates_for(&self, habit_id: &HabitId) -> Result<Vec<NaiveDate>, StorageError>;

    /// Number of completion records of a habit on a date
    fn count_completions_on(&self, habit_id: &HabitId, date: NaiveDate) -> Result<u32, StorageError>;

    /// Number of completion records of a habit in the week starting at `week_start`
    fn count_completions_in_week(&self, habit_id: &HabitId, week_start: NaiveDate) -> Result<u32, StorageError>;

    /// Total number of completion records of a habit
    fn count_completions(&self, habit_id: &HabitId) -> Result<u32, StorageError>;

    /// Completions of one habit within `start..=end`, newest first
    fn completions_in_range(
        &self,
        habit_id: &HabitId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Completion>, StorageError>;

    /// Completions of every habit within `start..=end`, newest first
    fn completions_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Completion>, StorageError>;

    // Categories

    fn create_category(&self, category: &Category) -> Result<(), StorageError>;

    /// Category by id; `None` when it does not exist
    fn find_category(&self, category_id: &CategoryId) -> Result<Option<Category>, StorageError>;

    /// Categories ordered by name
    fn list_categories(&self) -> Result<Vec<Category>, StorageError>;

    /// Delete a category; its habits become uncategorized
    fn delete_category(&self, category_id: &CategoryId) -> Result<(), StorageError>;

    // Settings

    fn get_setting(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_setting(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn all_settings(&self) -> Result<BTreeMap<String, String>, StorageError>;
}
