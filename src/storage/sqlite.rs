/// SQLite implementation of the habit storage interface
///
/// This module provides the concrete SQLite implementation for storing
/// and retrieving habit data. It handles all SQL queries and data conversion.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

use crate::domain::{
    Category, CategoryId, Completion, CompletionId, Frequency, Habit, HabitId,
};
use crate::storage::{migrations, HabitStorage, StorageError};

const HABIT_COLUMNS: &str = "id, name, description, emoji, category_id, frequency_type, \
     frequency_value, target_per_day, created_at, archived_at";

const COMPLETION_COLUMNS: &str = "id, habit_id, completed_at, logged_at, notes";

/// SQLite-based storage implementation
///
/// This struct holds a connection to the SQLite database and implements
/// all the storage operations defined in the HabitStorage trait.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Create a new SQLite storage instance
    ///
    /// This opens the database file and runs any necessary migrations
    /// to ensure the schema is up to date.
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        let storage = Self::from_connection(conn)?;
        tracing::info!("SQLite storage initialized at: {:?}", db_path);
        Ok(storage)
    }

    /// Open a private in-memory database, mostly for tests
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open in-memory database: {}", e)))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        // Completions cascade with their habit and categories detach on delete
        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(|e| StorageError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        migrations::initialize_database(&conn)?;

        Ok(Self { conn })
    }

    fn habit_exists(&self, habit_id: &HabitId) -> Result<bool, StorageError> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM habits WHERE id = ?1",
                params![habit_id.to_string()],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn query_habits(&self, sql: &str) -> Result<Vec<Habit>, StorageError> {
        let mut stmt = self.conn.prepare(sql)?;
        let habit_iter = stmt.query_map([], habit_from_row)?;

        let mut habits = Vec::new();
        for habit in habit_iter {
            habits.push(habit?);
        }
        Ok(habits)
    }

    fn query_completions(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<Completion>, StorageError> {
        let mut stmt = self.conn.prepare(sql)?;
        let completion_iter = stmt.query_map(params, completion_from_row)?;

        let mut completions = Vec::new();
        for completion in completion_iter {
            completions.push(completion?);
        }
        Ok(completions)
    }
}

fn invalid_column(idx: usize, what: &str) -> rusqlite::Error {
    rusqlite::Error::InvalidColumnType(idx, what.to_string(), rusqlite::types::Type::Text)
}

fn habit_from_row(row: &Row<'_>) -> rusqlite::Result<Habit> {
    let id_str: String = row.get(0)?;
    let id = HabitId::from_string(&id_str).map_err(|_| invalid_column(0, "Invalid UUID"))?;

    let category_id = match row.get::<_, Option<String>>(4)? {
        Some(s) => Some(CategoryId::from_string(&s).map_err(|_| invalid_column(4, "Invalid UUID"))?),
        None => None,
    };

    let frequency_type: String = row.get(5)?;
    let frequency_value: u8 = row.get(6)?;
    let created_at: DateTime<Utc> = row.get(8)?;
    let archived_at: Option<DateTime<Utc>> = row.get(9)?;

    Ok(Habit::from_existing(
        id,
        row.get(1)?, // name
        row.get(2)?, // description
        row.get(3)?, // emoji
        category_id,
        Frequency::from_parts(&frequency_type, frequency_value),
        row.get(7)?, // target_per_day
        created_at,
        archived_at,
    ))
}

fn completion_from_row(row: &Row<'_>) -> rusqlite::Result<Completion> {
    let id_str: String = row.get(0)?;
    let id = CompletionId::from_string(&id_str).map_err(|_| invalid_column(0, "Invalid UUID"))?;

    let habit_id_str: String = row.get(1)?;
    let habit_id = HabitId::from_string(&habit_id_str).map_err(|_| invalid_column(1, "Invalid UUID"))?;

    Ok(Completion::from_existing(
        id,
        habit_id,
        row.get(2)?, // completed_at
        row.get(3)?, // logged_at
        row.get(4)?, // notes
    ))
}

fn category_from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    let id_str: String = row.get(0)?;
    let id = CategoryId::from_string(&id_str).map_err(|_| invalid_column(0, "Invalid UUID"))?;

    Ok(Category::from_existing(
        id,
        row.get(1)?, // name
        row.get(2)?, // color
        row.get(3)?, // emoji
        row.get(4)?, // created_at
    ))
}

impl HabitStorage for SqliteStorage {
    fn create_habit(&self, habit: &Habit) -> Result<(), StorageError> {
        let (frequency_type, frequency_value) = habit.frequency.to_parts();

        self.conn.execute(
            "INSERT INTO habits (
                id, name, description, emoji, category_id, frequency_type,
                frequency_value, target_per_day, created_at, archived_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                habit.id.to_string(),
                habit.name,
                habit.description,
                habit.emoji,
                habit.category_id.as_ref().map(|c| c.to_string()),
                frequency_type,
                frequency_value,
                habit.target_per_day,
                habit.created_at.to_rfc3339(),
                habit.archived_at.map(|t| t.to_rfc3339()),
            ],
        )?;

        tracing::debug!("Created habit: {} ({})", habit.name, habit.id);
        Ok(())
    }

    fn get_habit(&self, habit_id: &HabitId) -> Result<Habit, StorageError> {
        let sql = format!("SELECT {} FROM habits WHERE id = ?1", HABIT_COLUMNS);
        let result = self
            .conn
            .query_row(&sql, params![habit_id.to_string()], habit_from_row);

        match result {
            Ok(habit) => Ok(habit),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StorageError::HabitNotFound {
                habit_id: habit_id.to_string(),
            }),
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    fn update_habit(&self, habit: &Habit) -> Result<(), StorageError> {
        let (frequency_type, frequency_value) = habit.frequency.to_parts();

        let rows_affected = self.conn.execute(
            "UPDATE habits SET
                name = ?2,
                description = ?3,
                emoji = ?4,
                category_id = ?5,
                frequency_type = ?6,
                frequency_value = ?7,
                target_per_day = ?8
             WHERE id = ?1",
            params![
                habit.id.to_string(),
                habit.name,
                habit.description,
                habit.emoji,
                habit.category_id.as_ref().map(|c| c.to_string()),
                frequency_type,
                frequency_value,
                habit.target_per_day,
            ],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::HabitNotFound {
                habit_id: habit.id.to_string(),
            });
        }

        tracing::debug!("Updated habit: {} ({})", habit.name, habit.id);
        Ok(())
    }

    fn set_archived(&self, habit_id: &HabitId, archived: bool) -> Result<(), StorageError> {
        let archived_at = archived.then(|| Utc::now().to_rfc3339());

        let rows_affected = self.conn.execute(
            "UPDATE habits SET archived_at = ?2 WHERE id = ?1",
            params![habit_id.to_string(), archived_at],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::HabitNotFound {
                habit_id: habit_id.to_string(),
            });
        }

        tracing::debug!("Set archived={} for habit {}", archived, habit_id);
        Ok(())
    }

    fn delete_habit(&self, habit_id: &HabitId) -> Result<(), StorageError> {
        let rows_affected = self.conn.execute(
            "DELETE FROM habits WHERE id = ?1",
            params![habit_id.to_string()],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::HabitNotFound {
                habit_id: habit_id.to_string(),
            });
        }

        tracing::debug!("Deleted habit: {}", habit_id);
        Ok(())
    }

    fn list_habits(&self, include_archived: bool) -> Result<Vec<Habit>, StorageError> {
        let sql = if include_archived {
            format!(
                "SELECT {} FROM habits
                 ORDER BY archived_at IS NOT NULL, name COLLATE NOCASE",
                HABIT_COLUMNS
            )
        } else {
            format!(
                "SELECT {} FROM habits WHERE archived_at IS NULL
                 ORDER BY name COLLATE NOCASE",
                HABIT_COLUMNS
            )
        };

        self.query_habits(&sql)
    }

    fn add_completion(&self, completion: &Completion) -> Result<(), StorageError> {
        if !self.habit_exists(&completion.habit_id)? {
            return Err(StorageError::HabitNotFound {
                habit_id: completion.habit_id.to_string(),
            });
        }

        self.conn.execute(
            "INSERT INTO completions (id, habit_id, completed_at, logged_at, notes)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                completion.id.to_string(),
                completion.habit_id.to_string(),
                completion.completed_on,
                completion.logged_at.to_rfc3339(),
                completion.notes,
            ],
        )?;

        tracing::debug!(
            "Recorded completion {} for habit {} on {}",
            completion.id,
            completion.habit_id,
            completion.completed_on
        );
        Ok(())
    }

    fn remove_completions_on(&self, habit_id: &HabitId, date: NaiveDate) -> Result<usize, StorageError> {
        let removed = self.conn.execute(
            "DELETE FROM completions WHERE habit_id = ?1 AND completed_at = ?2",
            params![habit_id.to_string(), date],
        )?;

        tracing::debug!("Removed {} completion(s) for habit {} on {}", removed, habit_id, date);
        Ok(removed)
    }

    fn completion_dates_for(&self, habit_id: &HabitId) -> Result<Vec<NaiveDate>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT completed_at FROM completions
             WHERE habit_id = ?1
             ORDER BY completed_at ASC",
        )?;
        let date_iter = stmt.query_map(params![habit_id.to_string()], |row| row.get::<_, NaiveDate>(0))?;

        let mut dates = Vec::new();
        for date in date_iter {
            dates.push(date?);
        }
        Ok(dates)
    }

    fn count_completions_on(&self, habit_id: &HabitId, date: NaiveDate) -> Result<u32, StorageError> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM completions WHERE habit_id = ?1 AND completed_at = ?2",
            params![habit_id.to_string(), date],
            |row| row.get::<_, u32>(0),
        )?;
        Ok(count)
    }

    fn count_completions_in_week(&self, habit_id: &HabitId, week_start: NaiveDate) -> Result<u32, StorageError> {
        let week_end = week_start + Duration::days(6);
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM completions
             WHERE habit_id = ?1 AND completed_at BETWEEN ?2 AND ?3",
            params![habit_id.to_string(), week_start, week_end],
            |row| row.get::<_, u32>(0),
        )?;
        Ok(count)
    }

    fn count_completions(&self, habit_id: &HabitId) -> Result<u32, StorageError> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM completions WHERE habit_id = ?1",
            params![habit_id.to_string()],
            |row| row.get::<_, u32>(0),
        )?;
        Ok(count)
    }

    fn completions_in_range(
        &self,
        habit_id: &HabitId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Completion>, StorageError> {
        let sql = format!(
            "SELECT {} FROM completions
             WHERE habit_id = ?1 AND completed_at BETWEEN ?2 AND ?3
             ORDER BY completed_at DESC, logged_at DESC",
            COMPLETION_COLUMNS
        );
        self.query_completions(&sql, params![habit_id.to_string(), start, end])
    }

    fn completions_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Completion>, StorageError> {
        let sql = format!(
            "SELECT {} FROM completions
             WHERE completed_at BETWEEN ?1 AND ?2
             ORDER BY completed_at DESC, logged_at DESC",
            COMPLETION_COLUMNS
        );
        self.query_completions(&sql, params![start, end])
    }

    fn create_category(&self, category: &Category) -> Result<(), StorageError> {
        let result = self.conn.execute(
            "INSERT INTO categories (id, name, color, emoji, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                category.id.to_string(),
                category.name,
                category.color,
                category.emoji,
                category.created_at.to_rfc3339(),
            ],
        );

        match result {
            Ok(_) => {
                tracing::debug!("Created category: {} ({})", category.name, category.id);
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(err, _)) if err.code == ErrorCode::ConstraintViolation => {
                Err(StorageError::DuplicateCategory {
                    name: category.name.clone(),
                })
            }
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    fn find_category(&self, category_id: &CategoryId) -> Result<Option<Category>, StorageError> {
        let category = self
            .conn
            .query_row(
                "SELECT id, name, color, emoji, created_at FROM categories WHERE id = ?1",
                params![category_id.to_string()],
                category_from_row,
            )
            .optional()?;
        Ok(category)
    }

    fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, color, emoji, created_at FROM categories
             ORDER BY name COLLATE NOCASE",
        )?;
        let category_iter = stmt.query_map([], category_from_row)?;

        let mut categories = Vec::new();
        for category in category_iter {
            categories.push(category?);
        }
        Ok(categories)
    }

    fn delete_category(&self, category_id: &CategoryId) -> Result<(), StorageError> {
        let rows_affected = self.conn.execute(
            "DELETE FROM categories WHERE id = ?1",
            params![category_id.to_string()],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::CategoryNotFound {
                category_id: category_id.to_string(),
            });
        }

        tracing::debug!("Deleted category: {}", category_id);
        Ok(())
    }

    fn get_setting(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_setting(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        tracing::debug!("Set setting {} = {}", key, value);
        Ok(())
    }

    fn all_settings(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT key, value FROM settings")?;
        let pair_iter = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;

        let mut settings = BTreeMap::new();
        for pair in pair_iter {
            let (key, value) = pair?;
            settings.insert(key, value);
        }
        Ok(settings)
    }
}
