/// Command line interface for hbt
///
/// Every subcommand except `serve` maps onto one tool call; the tool's
/// message is printed, or the whole response as JSON with `--json`.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use hbt::tools::{self, *};
use hbt::{HabitTracker, TrackerError};

/// Command line arguments for hbt
#[derive(Parser, Debug)]
#[command(name = "hbt", author, version, about, long_about = None)]
pub struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses $HBT_DATABASE or a default data directory
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print the full response as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Show today's habits (default)
    Today,
    /// Check a habit for today, or uncheck it
    Toggle {
        /// Habit name, id or id prefix
        habit: String,
    },
    /// Log a completion, optionally for a past date
    Done {
        habit: String,
        #[arg(short, long)]
        note: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },
    /// Manage habits
    #[command(subcommand)]
    Habit(HabitCommand),
    /// Manage categories
    #[command(subcommand)]
    Category(CategoryCommand),
    /// Totals with daily and weekly trends
    Stats {
        #[arg(long)]
        days: Option<u32>,
        #[arg(long)]
        weeks: Option<u32>,
    },
    /// Lifetime numbers per habit
    HabitsStats,
    /// Read or change settings
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Serve JSON-RPC over stdin/stdout
    Serve,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum HabitCommand {
    /// Create a habit
    Add {
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        emoji: Option<String>,
        /// Category name or id
        #[arg(short, long)]
        category: Option<String>,
        /// daily, weekly, 3x, 3/week or times_per_week:3
        #[arg(short, long)]
        frequency: Option<String>,
        /// Completions expected per day
        #[arg(short, long)]
        target: Option<u32>,
    },
    /// List habits
    List {
        #[arg(short, long)]
        category: Option<String>,
        /// Include archived habits
        #[arg(short, long)]
        all: bool,
    },
    /// Change a habit; an empty value clears optional fields
    Edit {
        habit: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        emoji: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        frequency: Option<String>,
        #[arg(short, long)]
        target: Option<u32>,
    },
    Archive { habit: String },
    Unarchive { habit: String },
    /// Delete a habit and all of its completions
    Delete { habit: String },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum CategoryCommand {
    Add {
        name: String,
        /// #RRGGBB
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        emoji: Option<String>,
    },
    List,
    /// Delete a category; its habits become uncategorized
    Delete { category: String },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum ConfigCommand {
    Get { key: String },
    Set { key: String, value: String },
    List,
}

impl Command {
    /// Run a one-shot command against the tracker and print the result.
    /// `serve` is handled by the caller.
    pub fn run(self, tracker: &HabitTracker, json: bool) -> Result<(), TrackerError> {
        let storage = tracker.storage();

        match self {
            Command::Today => {
                let r = tools::today_status(storage, TodayStatusParams::default())?;
                print(&r, &r.message, json)
            }
            Command::Toggle { habit } => {
                let r = tools::toggle_habit(storage, ToggleHabitParams { habit })?;
                print(&r, &r.message, json)
            }
            Command::Done { habit, note, date } => {
                let params = CompleteHabitParams {
                    habit,
                    date,
                    notes: note,
                };
                let r = tools::complete_habit(storage, params)?;
                print(&r, &r.message, json)
            }
            Command::Habit(command) => command.run(tracker, json),
            Command::Category(command) => command.run(tracker, json),
            Command::Stats { days, weeks } => {
                let r = tools::stats_overview(storage, StatsOverviewParams { days, weeks })?;
                print(&r, &r.message, json)
            }
            Command::HabitsStats => {
                let r = tools::habit_stats(storage, HabitStatsParams::default())?;
                print(&r, &r.message, json)
            }
            Command::Config(command) => command.run(tracker, json),
            Command::Serve => Err(TrackerError::InvalidInput(
                "serve must be started from main".to_string(),
            )),
        }
    }
}

impl HabitCommand {
    fn run(self, tracker: &HabitTracker, json: bool) -> Result<(), TrackerError> {
        let storage = tracker.storage();

        match self {
            HabitCommand::Add {
                name,
                description,
                emoji,
                category,
                frequency,
                target,
            } => {
                let params = CreateHabitParams {
                    name,
                    description,
                    emoji,
                    category,
                    frequency,
                    target_per_day: target,
                };
                let r = tools::create_habit(storage, params)?;
                print(&r, &r.message, json)
            }
            HabitCommand::List { category, all } => {
                let params = ListHabitsParams {
                    category,
                    include_archived: Some(all),
                };
                let r = tools::list_habits(storage, params)?;
                print(&r, &r.message, json)
            }
            HabitCommand::Edit {
                habit,
                name,
                description,
                emoji,
                category,
                frequency,
                target,
            } => {
                let params = UpdateHabitParams {
                    habit,
                    name,
                    description,
                    emoji,
                    category,
                    frequency,
                    target_per_day: target,
                };
                let r = tools::update_habit(storage, params)?;
                print(&r, &r.message, json)
            }
            HabitCommand::Archive { habit } => {
                let r = tools::archive_habit(storage, HabitRefParams { habit })?;
                print(&r, &r.message, json)
            }
            HabitCommand::Unarchive { habit } => {
                let r = tools::unarchive_habit(storage, HabitRefParams { habit })?;
                print(&r, &r.message, json)
            }
            HabitCommand::Delete { habit } => {
                let r = tools::delete_habit(storage, HabitRefParams { habit })?;
                print(&r, &r.message, json)
            }
        }
    }
}

impl CategoryCommand {
    fn run(self, tracker: &HabitTracker, json: bool) -> Result<(), TrackerError> {
        let storage = tracker.storage();

        match self {
            CategoryCommand::Add { name, color, emoji } => {
                let r = tools::create_category(storage, CreateCategoryParams { name, color, emoji })?;
                print(&r, &r.message, json)
            }
            CategoryCommand::List => {
                let r = tools::list_categories(storage, ListCategoriesParams::default())?;
                print(&r, &r.message, json)
            }
            CategoryCommand::Delete { category } => {
                let r = tools::delete_category(storage, DeleteCategoryParams { category })?;
                print(&r, &r.message, json)
            }
        }
    }
}

impl ConfigCommand {
    fn run(self, tracker: &HabitTracker, json: bool) -> Result<(), TrackerError> {
        let storage = tracker.storage();

        match self {
            ConfigCommand::Get { key } => {
                let r = tools::get_config(storage, GetConfigParams { key: Some(key) })?;
                print(&r, &r.message, json)
            }
            ConfigCommand::Set { key, value } => {
                let r = tools::set_config(storage, SetConfigParams { key, value })?;
                print(&r, &r.message, json)
            }
            ConfigCommand::List => {
                let r = tools::get_config(storage, GetConfigParams::default())?;
                print(&r, &r.message, json)
            }
        }
    }
}

fn print<R: Serialize>(response: &R, message: &str, json: bool) -> Result<(), TrackerError> {
    if json {
        println!("{}", serde_json::to_string_pretty(response)?);
    } else {
        println!("{}", message);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("hbt").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_command_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let args = parse(&[]);
        assert!(args.command.is_none());
        assert!(!args.json);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = parse(&["toggle", "Read", "--json", "--database", "/tmp/h.db"]);
        assert!(args.json);
        assert_eq!(args.database, Some(PathBuf::from("/tmp/h.db")));
        assert_eq!(
            args.command,
            Some(Command::Toggle {
                habit: "Read".to_string()
            })
        );
    }

    #[test]
    fn test_nested_subcommands() {
        let args = parse(&["habit", "add", "Gym", "-f", "3x", "-t", "2"]);
        assert_eq!(
            args.command,
            Some(Command::Habit(HabitCommand::Add {
                name: "Gym".to_string(),
                description: None,
                emoji: None,
                category: None,
                frequency: Some("3x".to_string()),
                target: Some(2),
            }))
        );

        let args = parse(&["done", "Gym", "--date", "2026-10-17", "-n", "legs"]);
        assert_eq!(
            args.command,
            Some(Command::Done {
                habit: "Gym".to_string(),
                note: Some("legs".to_string()),
                date: Some("2026-10-17".to_string()),
            })
        );
    }

    #[test]
    fn test_run_against_in_memory_tracker() {
        let tracker = HabitTracker::in_memory().unwrap();
        Command::Habit(HabitCommand::Add {
            name: "Read".to_string(),
            description: None,
            emoji: None,
            category: None,
            frequency: None,
            target: None,
        })
        .run(&tracker, false)
        .unwrap();

        Command::Toggle {
            habit: "read".to_string(),
        }
        .run(&tracker, true)
        .unwrap();

        let missing = Command::Toggle {
            habit: "Swim".to_string(),
        }
        .run(&tracker, false);
        assert!(missing.unwrap_err().is_not_found());
    }
}
