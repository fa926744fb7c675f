/// Tools for managing categories
///
/// This module implements create_category, list_categories and
/// delete_category.

use serde::{Deserialize, Serialize};
use crate::domain::category::DEFAULT_COLORS;
use crate::domain::Category;
use crate::storage::HabitStorage;
use crate::tools::create::non_blank;
use crate::tools::{plural, resolve_category};
use crate::TrackerError;

/// Parameters for creating a category
#[derive(Debug, Default, Deserialize)]
pub struct CreateCategoryParams {
    pub name: String,
    /// `#RRGGBB`; picked from the palette when omitted
    pub color: Option<String>,
    pub emoji: Option<String>,
}

/// Response from creating a category
#[derive(Debug, Serialize)]
pub struct CreateCategoryResponse {
    pub success: bool,
    pub category: Category,
    pub message: String,
}

/// Parameters for listing categories (none yet)
#[derive(Debug, Default, Deserialize)]
pub struct ListCategoriesParams {}

/// A category with the number of habits in it
#[derive(Debug, Serialize)]
pub struct CategorySummary {
    #[serde(flatten)]
    pub category: Category,
    pub habit_count: u32,
}

/// Response from listing categories
#[derive(Debug, Serialize)]
pub struct ListCategoriesResponse {
    pub categories: Vec<CategorySummary>,
    pub message: String,
}

/// Parameters naming a single category
#[derive(Debug, Deserialize)]
pub struct DeleteCategoryParams {
    /// Category id or name
    pub category: String,
}

/// Response from deleting a category
#[derive(Debug, Serialize)]
pub struct DeleteCategoryResponse {
    pub success: bool,
    /// Habits that lost their category
    pub detached_habits: u32,
    pub message: String,
}

/// Create a new category
pub fn create_category<S: HabitStorage>(
    storage: &S,
    params: CreateCategoryParams,
) -> Result<CreateCategoryResponse, TrackerError> {
    let color = match non_blank(params.color.as_deref()) {
        Some(color) => color.to_string(),
        None => {
            let existing = storage.list_categories()?.len();
            DEFAULT_COLORS[existing % DEFAULT_COLORS.len()].to_string()
        }
    };

    let category = Category::new(params.name, Some(color), params.emoji)?;
    storage.create_category(&category)?;

    let label = match &category.emoji {
        Some(emoji) => format!("{} {}", emoji, category.name),
        None => category.name.clone(),
    };

    Ok(CreateCategoryResponse {
        success: true,
        message: format!("🏷️ Created category '{}' ({})", label, category.color),
        category,
    })
}

/// List categories with their habit counts
pub fn list_categories<S: HabitStorage>(
    storage: &S,
    _params: ListCategoriesParams,
) -> Result<ListCategoriesResponse, TrackerError> {
    let habits = storage.list_habits(true)?;

    let categories: Vec<CategorySummary> = storage
        .list_categories()?
        .into_iter()
        .map(|category| {
            let count = habits
                .iter()
                .filter(|h| h.category_id.as_ref() == Some(&category.id))
                .count();
            CategorySummary {
                category,
                habit_count: u32::try_from(count).unwrap_or(u32::MAX),
            }
        })
        .collect();

    let message = if categories.is_empty() {
        "No categories yet.".to_string()
    } else {
        categories
            .iter()
            .map(|c| {
                let emoji = c.category.emoji.as_deref().unwrap_or(" ");
                format!(
                    "  {} {} {} ({})",
                    emoji,
                    c.category.name,
                    c.category.color,
                    plural(c.habit_count, "habit")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    Ok(ListCategoriesResponse { categories, message })
}

/// Delete a category; its habits become uncategorized
pub fn delete_category<S: HabitStorage>(
    storage: &S,
    params: DeleteCategoryParams,
) -> Result<DeleteCategoryResponse, TrackerError> {
    let category = resolve_category(storage, &params.category)?;
    let detached = storage
        .list_habits(true)?
        .iter()
        .filter(|h| h.category_id.as_ref() == Some(&category.id))
        .count();

    storage.delete_category(&category.id)?;
    let detached_habits = u32::try_from(detached).unwrap_or(u32::MAX);

    Ok(DeleteCategoryResponse {
        success: true,
        detached_habits,
        message: format!(
            "🗑️ Deleted category '{}' ({} now uncategorized)",
            category.name,
            plural(detached_habits, "habit")
        ),
    })
}
