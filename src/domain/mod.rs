/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Habit, Completion, Category), the
/// frequency policy and the streak calculator, together with their
/// validation rules.

pub mod calendar;
pub mod category;
pub mod completion;
pub mod habit;
pub mod settings;
pub mod streak;
pub mod types;

// Re-export public types for easy access
pub use category::*;
pub use completion::*;
pub use habit::*;
pub use settings::Settings;
pub use streak::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid value: {message}")]
    InvalidValue { message: String },
}
