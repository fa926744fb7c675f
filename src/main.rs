/// Main entry point for hbt
///
/// This file sets up logging, parses command line arguments, opens the
/// habit database and runs the requested command. `hbt serve` answers
/// JSON-RPC requests over stdin/stdout instead.

mod cli;

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use cli::{Args, Command};
use hbt::HabitTracker;

const DATABASE_FILE: &str = "habits.db";

/// Get the default database path with robust fallback strategy
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Try various locations in order of preference
    let potential_dirs = [
        // 1. XDG data home, when set
        std::env::var_os("XDG_DATA_HOME")
            .filter(|v| !v.is_empty())
            .map(|v| PathBuf::from(v).join("hbt")),
        // 2. Platform data directory
        dirs::data_dir().map(|p| p.join("hbt")),
        // 3. Home directory
        dirs::home_dir().map(|p| p.join(".hbt")),
        // 4. Current working directory
        std::env::current_dir().ok().map(|p| p.join(".hbt")),
    ];

    for dir in potential_dirs.iter().flatten() {
        if is_writable_dir(dir) {
            return Ok(dir.join(DATABASE_FILE));
        }
    }

    // Ultimate fallback: use a temporary directory
    let temp_dir = std::env::temp_dir().join("hbt");
    std::fs::create_dir_all(&temp_dir)?;

    let path = temp_dir.join(DATABASE_FILE);
    warn!("Using temporary directory for database: {}", path.display());
    Ok(path)
}

/// Create `dir` if needed and check a file can be written inside it
fn is_writable_dir(dir: &Path) -> bool {
    if std::fs::create_dir_all(dir).is_err() {
        return false;
    }

    let probe = dir.join(".write_test");
    if std::fs::write(&probe, "test").is_err() {
        return false;
    }
    let _ = std::fs::remove_file(&probe);
    true
}

/// Resolve the database path: flag, then environment, then defaults
fn resolve_database_path(flag: Option<PathBuf>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let explicit = flag.or_else(|| {
        std::env::var_os("HBT_DATABASE")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    });

    match explicit {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            Ok(path)
        }
        None => get_default_database_path(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("hbt={}", log_level))
        .with_writer(std::io::stderr) // stdout carries reports and JSON-RPC
        .init();

    let db_path = resolve_database_path(args.database)?;
    info!("Using database at: {}", db_path.display());

    let tracker = HabitTracker::open(db_path)?;

    match args.command.unwrap_or(Command::Today) {
        Command::Serve => {
            tracker.serve().await?;
            info!("hbt server shutdown complete");
        }
        command => command.run(&tracker, args.json)?,
    }

    Ok(())
}
