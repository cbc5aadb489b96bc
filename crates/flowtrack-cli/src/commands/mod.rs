//! CLI command definitions and handlers.

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::config::{FileConfig, Overrides, Settings};
use flowtrack_core::{BoardStore, MemoryStorage, Outcome, SlotStorage};
use flowtrack_db::DbPool;

pub mod board;
pub mod card;
pub mod list;
pub mod status;

/// FlowTrack - kanban boards in the terminal
#[derive(Parser)]
#[command(name = "flowtrack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the database file
    #[arg(long, global = true, env = "FLOWTRACK_DB")]
    pub db: Option<PathBuf>,

    /// Storage slot holding the boards
    #[arg(long, global = true, env = "FLOWTRACK_SLOT")]
    pub slot: Option<String>,

    /// Keep everything in memory; nothing is saved
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Path to the config file
    #[arg(long, global = true, env = "FLOWTRACK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the active board
    Show,

    /// Manage boards
    #[command(subcommand)]
    Board(board::BoardCommands),

    /// Manage lists on the active board
    #[command(subcommand)]
    List(list::ListCommands),

    /// Manage cards on the active board
    #[command(subcommand)]
    Card(card::CardCommands),

    /// Show storage and state summary
    Status,

    /// Forget the saved boards; the next run starts from the demo board
    Reset(status::ResetArgs),
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        let file = FileConfig::load(self.config.as_deref())?;
        let settings = Settings::resolve(
            file,
            Overrides {
                db_path: self.db,
                slot: self.slot,
                ephemeral: self.ephemeral,
            },
        );
        debug!(?settings, "Resolved settings");

        match self.command {
            Commands::Show => status::show(&settings),
            Commands::Board(cmd) => board::execute(cmd, &settings),
            Commands::List(cmd) => list::execute(cmd, &settings),
            Commands::Card(cmd) => card::execute(cmd, &settings),
            Commands::Status => status::execute(&settings),
            Commands::Reset(args) => status::reset(args, &settings),
        }
    }
}

pub type Store = BoardStore<Box<dyn SlotStorage>>;

/// Open the configured database, or `None` for ephemeral sessions and
/// databases that cannot be opened.
pub fn open_pool(settings: &Settings) -> Option<DbPool> {
    if settings.ephemeral {
        return None;
    }
    match flowtrack_db::init_pool(&settings.db_path) {
        Ok(pool) => Some(pool),
        Err(e) => {
            warn!(
                path = %settings.db_path.display(),
                error = %e,
                "Database unavailable, changes will not be saved"
            );
            None
        }
    }
}

/// Open a store over `pool`, or over memory when there is none.
pub fn store_over(pool: Option<DbPool>, settings: &Settings) -> Store {
    let storage: Box<dyn SlotStorage> = match pool {
        Some(pool) => Box::new(pool),
        None => Box::new(MemoryStorage::new()),
    };
    BoardStore::open(storage, settings.slot.clone())
}

/// Open the store for these settings.
///
/// When the database cannot be opened the session continues in memory, so
/// the command still works but nothing is saved.
pub fn open_store(settings: &Settings) -> Store {
    store_over(open_pool(settings), settings)
}

/// Turn an ignored mutation into a command error.
pub fn applied<T>(outcome: Outcome<T>, action: &str) -> Result<T> {
    outcome
        .into_result()
        .with_context(|| format!("Could not {}", action))
}

/// The active board's id, or an error telling the user how to get one.
pub fn active_board_id(store: &Store) -> Result<String> {
    store
        .active_board()
        .map(|b| b.id.clone())
        .ok_or_else(|| anyhow::anyhow!("No active board. Create one with 'flowtrack board add'."))
}
