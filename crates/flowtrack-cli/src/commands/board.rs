//! Board management commands.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use dialoguer::Confirm;

use super::{applied, open_store};
use crate::config::Settings;
use crate::{output, resolve};
use flowtrack_core::board::model::DEFAULT_BOARD_NAME;
use flowtrack_core::input;

#[derive(Subcommand)]
pub enum BoardCommands {
    /// List all boards
    List,

    /// Create a board and switch to it
    Add(AddBoardArgs),

    /// Rename a board
    Rename {
        /// Board id, id prefix or name
        board: String,
        /// New name
        name: String,
    },

    /// Delete a board and everything on it
    Delete {
        /// Board id, id prefix or name
        board: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Switch the active board
    Use {
        /// Board id, id prefix or name
        board: String,
    },
}

#[derive(Args)]
pub struct AddBoardArgs {
    /// Board name
    #[arg(default_value = DEFAULT_BOARD_NAME)]
    pub name: String,

    /// Accent color (#rrggbb); defaults to the configured color
    #[arg(short, long)]
    pub color: Option<String>,
}

pub fn execute(cmd: BoardCommands, settings: &Settings) -> Result<()> {
    let mut store = open_store(settings);

    match cmd {
        BoardCommands::List => {
            output::print_boards_table(store.state());
        }

        BoardCommands::Add(args) => {
            let name = input::required("Board name", &args.name)?;
            let color = input::optional(args.color.as_deref())
                .unwrap_or_else(|| settings.default_color.clone());
            let id = applied(store.add_board(&name, &color), "create board")?;

            println!(
                "{} Created board: {} ({})",
                "✓".green().bold(),
                name.cyan(),
                id.dimmed()
            );
        }

        BoardCommands::Rename { board, name } => {
            let name = input::required("Board name", &name)?;
            let (id, old) = {
                let found = resolve::board(store.boards(), &board)?;
                (found.id.clone(), found.name.clone())
            };
            applied(store.rename_board(&id, &name), "rename board")?;

            println!(
                "{} Renamed board: {} → {}",
                "✓".green().bold(),
                old.dimmed(),
                name.cyan()
            );
        }

        BoardCommands::Delete { board, yes } => {
            let (id, name, cards) = {
                let found = resolve::board(store.boards(), &board)?;
                (found.id.clone(), found.name.clone(), found.card_count())
            };
            if store.boards().len() <= 1 {
                bail!("'{}' is the only board and cannot be deleted", name);
            }

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete board '{}' and its {} card(s)?", name, cards))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    println!("{}", "Cancelled.".dimmed());
                    return Ok(());
                }
            }

            applied(store.delete_board(&id), "delete board")?;
            println!("{} Deleted board: {}", "✓".green().bold(), name.cyan());
            if let Some(active) = store.active_board() {
                println!("  Active board: {}", active.name.bold());
            }
        }

        BoardCommands::Use { board } => {
            let (id, name) = {
                let found = resolve::board(store.boards(), &board)?;
                (found.id.clone(), found.name.clone())
            };
            applied(store.set_active_board(&id), "switch board")?;
            println!("{} Active board: {}", "✓".green().bold(), name.cyan());
        }
    }

    store.close();
    Ok(())
}
