/// Public library interface for the hbt habit tracker
///
/// This module exports the tracker handle, the statistics service and the
/// tool functions shared by the command line and the JSON-RPC server.

use std::path::PathBuf;
use thiserror::Error;

// Internal modules
mod domain;
mod storage;
mod rpc;
pub mod stats;
pub mod tools;

// Re-export public modules and types
pub use domain::*;
pub use storage::{HabitStorage, SqliteStorage, StorageError};
pub use stats::{DailyStat, HabitStat, HabitStatus, Overview, StatsService};
pub use rpc::RpcServer;

/// Errors surfaced by the tracker and its tools
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("'{reference}' matches more than one habit: {candidates}")]
    AmbiguousHabit { reference: String, candidates: String },
}

impl TrackerError {
    /// True when a referenced habit or category does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, TrackerError::Database(e) if e.is_not_found())
    }
}

/// Handle on an open habit database
///
/// Owns the storage connection and hands out statistics services and the
/// JSON-RPC server built on top of it.
pub struct HabitTracker {
    storage: SqliteStorage,
}

impl HabitTracker {
    /// Open (and migrate if needed) the database at `db_path`
    pub fn open(db_path: PathBuf) -> Result<Self, TrackerError> {
        tracing::info!("Opening habit database: {:?}", db_path);

        let storage = SqliteStorage::new(db_path)?;
        Ok(Self { storage })
    }

    /// Tracker backed by a private in-memory database
    pub fn in_memory() -> Result<Self, TrackerError> {
        Ok(Self {
            storage: SqliteStorage::open_in_memory()?,
        })
    }

    /// Get a reference to the storage layer
    pub fn storage(&self) -> &SqliteStorage {
        &self.storage
    }

    /// Statistics anchored on today's local date
    pub fn stats(&self) -> StatsService<'_, SqliteStorage> {
        StatsService::new(&self.storage)
    }

    /// Stored display preferences, defaults filled in
    pub fn settings(&self) -> Result<Settings, TrackerError> {
        Ok(Settings::from_pairs(&self.storage.all_settings()?))
    }

    /// Serve JSON-RPC requests over stdin/stdout until stdin closes
    pub async fn serve(self) -> Result<(), TrackerError> {
        let habits = self.storage.active_habits()?;
        tracing::info!("Starting JSON-RPC server with {} active habits", habits.len());

        let mut server = RpcServer::new(self);
        server.run().await
    }
}
