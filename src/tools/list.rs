/// Tool for listing all habits
///
/// This module implements the list_habits tool.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use crate::domain::{CategoryView, Frequency};
use crate::storage::HabitStorage;
use crate::tools::{plural, resolve_category};
use crate::TrackerError;

/// Parameters for listing habits
#[derive(Debug, Default, Deserialize)]
pub struct ListHabitsParams {
    /// Category id or name to filter by
    pub category: Option<String>,
    /// Include archived habits (default: false)
    pub include_archived: Option<bool>,
}

/// Information about a habit in the list
#[derive(Debug, Serialize)]
pub struct HabitSummary {
    pub habit_id: String,
    pub short_id: String,
    pub name: String,
    pub emoji: Option<String>,
    pub description: Option<String>,
    pub frequency: Frequency,
    pub target_per_day: u32,
    pub category: Option<CategoryView>,
    pub total_completions: u32,
    pub archived: bool,
}

/// Response from listing habits
#[derive(Debug, Serialize)]
pub struct ListHabitsResponse {
    pub habits: Vec<HabitSummary>,
    pub message: String,
}

/// List habits using the provided storage
pub fn list_habits<S: HabitStorage>(
    storage: &S,
    params: ListHabitsParams,
) -> Result<ListHabitsResponse, TrackerError> {
    let category_filter = match params.category.as_deref() {
        Some(reference) => Some(resolve_category(storage, reference)?.id),
        None => None,
    };

    let categories: HashMap<_, _> = storage
        .list_categories()?
        .iter()
        .map(|c| (c.id.clone(), CategoryView::from(c)))
        .collect();

    let habits = storage.list_habits(params.include_archived.unwrap_or(false))?;

    let mut summaries = Vec::with_capacity(habits.len());
    for habit in habits {
        if category_filter.is_some() && habit.category_id != category_filter {
            continue;
        }

        summaries.push(HabitSummary {
            habit_id: habit.id.to_string(),
            short_id: habit.id.short(),
            category: habit.category_id.as_ref().and_then(|id| categories.get(id).cloned()),
            total_completions: storage.count_completions(&habit.id)?,
            archived: habit.is_archived(),
            name: habit.name,
            emoji: habit.emoji,
            description: habit.description,
            frequency: habit.frequency,
            target_per_day: habit.target_per_day,
        });
    }

    let message = if summaries.is_empty() {
        "No habits found. Create your first habit to get started!".to_string()
    } else {
        let lines: Vec<String> = summaries.iter().map(format_summary).collect();
        format!(
            "📋 {}\n\n{}",
            plural(u32::try_from(summaries.len()).unwrap_or(u32::MAX), "habit"),
            lines.join("\n")
        )
    };

    Ok(ListHabitsResponse {
        habits: summaries,
        message,
    })
}

fn format_summary(habit: &HabitSummary) -> String {
    let mut line = format!("  {}  ", habit.short_id);
    if let Some(emoji) = &habit.emoji {
        line.push_str(emoji);
        line.push(' ');
    }
    line.push_str(&habit.name);
    line.push_str(&format!(" ({}", habit.frequency));
    if habit.target_per_day > 1 {
        line.push_str(&format!(", {}x per day", habit.target_per_day));
    }
    line.push(')');
    if let Some(category) = &habit.category {
        line.push_str(&format!(" [{}]", category.name));
    }
    line.push_str(&format!(" | ✅ {}", habit.total_completions));
    if habit.archived {
        line.push_str(" 📦 (archived)");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Habit};
    use crate::storage::SqliteStorage;

    #[test]
    fn test_list_filters_by_category_and_archive() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let health = Category::new("Health".to_string(), None, None).unwrap();
        storage.create_category(&health).unwrap();

        let run = Habit::new("Run".to_string(), None, Some(health.id.clone()), Frequency::Daily, 1).unwrap();
        let read = Habit::new("Read".to_string(), None, None, Frequency::Weekly, 1).unwrap();
        let old = Habit::new("Old".to_string(), None, Some(health.id.clone()), Frequency::Daily, 1).unwrap();
        for habit in [&run, &read, &old] {
            storage.create_habit(habit).unwrap();
        }
        storage.set_archived(&old.id, true).unwrap();

        let active = list_habits(&storage, ListHabitsParams::default()).unwrap();
        let names: Vec<&str> = active.habits.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Read", "Run"]);
        assert!(active.message.contains("2 habits"));

        let everything = list_habits(
            &storage,
            ListHabitsParams {
                category: Some("health".to_string()),
                include_archived: Some(true),
            },
        )
        .unwrap();
        let names: Vec<&str> = everything.habits.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Run", "Old"]);
        assert!(everything.habits[1].archived);
        assert_eq!(everything.habits[0].category.as_ref().unwrap().name, "Health");
    }

    #[test]
    fn test_empty_list() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let response = list_habits(&storage, ListHabitsParams::default()).unwrap();
        assert!(response.habits.is_empty());
        assert!(response.message.contains("No habits found"));
    }
}
