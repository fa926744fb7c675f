/// Categories for organizing habits into life areas

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::{CategoryId, DomainError};

/// Color used when none is given
pub const DEFAULT_COLOR: &str = "#CCCCCC";

/// Palette offered for quick selection
pub const DEFAULT_COLORS: [&str; 8] = [
    "#FF6B6B", // red
    "#4ECDC4", // teal
    "#45B7D1", // blue
    "#96CEB4", // green
    "#FFEAA7", // yellow
    "#DDA0DD", // plum
    "#98D8C8", // mint
    "#F7DC6F", // gold
];

/// A named group of habits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Hex color code, `#RRGGBB`
    pub color: String,
    pub emoji: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: String, color: Option<String>, emoji: Option<String>) -> Result<Self, DomainError> {
        let name = name.trim().to_string();
        Self::validate_name(&name)?;
        let color = color.unwrap_or_else(|| DEFAULT_COLOR.to_string());
        Self::validate_color(&color)?;

        Ok(Self {
            id: CategoryId::new(),
            name,
            color: color.to_uppercase(),
            emoji: emoji.filter(|e| !e.trim().is_empty()),
            created_at: Utc::now(),
        })
    }

    pub fn from_existing(
        id: CategoryId,
        name: String,
        color: String,
        emoji: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self { id, name, color, emoji, created_at }
    }

    fn validate_name(name: &str) -> Result<(), DomainError> {
        if name.is_empty() {
            return Err(DomainError::Validation {
                message: "Category name cannot be empty".to_string()
            });
        }
        if name.chars().count() > 50 {
            return Err(DomainError::Validation {
                message: "Category name cannot be longer than 50 characters".to_string()
            });
        }
        Ok(())
    }

    fn validate_color(color: &str) -> Result<(), DomainError> {
        let hex = color.strip_prefix('#').unwrap_or("");
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DomainError::InvalidValue {
                message: format!("Color must look like #RRGGBB, got '{}'", color)
            });
        }
        Ok(())
    }
}

/// Read-only category details shown next to a habit.
///
/// Assembled by the views from a category-by-id lookup; habits only hold
/// the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryView {
    pub id: CategoryId,
    pub name: String,
    pub color: String,
    pub emoji: Option<String>,
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.clone(),
            name: category.name.clone(),
            color: category.color.clone(),
            emoji: category.emoji.clone(),
        }
    }
}
