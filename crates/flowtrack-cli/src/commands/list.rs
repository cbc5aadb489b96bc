//! List commands on the active board.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::{active_board_id, applied, open_store, Store};
use crate::config::Settings;
use crate::resolve;
use flowtrack_core::board::model::DEFAULT_LIST_TITLE;
use flowtrack_core::drag::Gesture;
use flowtrack_core::{input, Board, Mutation};

#[derive(Subcommand)]
pub enum ListCommands {
    /// Append a list to the active board
    Add {
        /// List title
        #[arg(default_value = DEFAULT_LIST_TITLE)]
        title: String,
    },

    /// Rename a list
    Rename {
        /// List id, id prefix or title
        list: String,
        /// New title
        title: String,
    },

    /// Delete a list and its cards
    Delete {
        /// List id, id prefix or title
        list: String,
    },

    /// Drag a list to another position
    Move {
        /// List id, id prefix or title
        list: String,
        /// Zero-based target position
        index: usize,
    },
}

pub fn execute(cmd: ListCommands, settings: &Settings) -> Result<()> {
    let mut store = open_store(settings);
    let board_id = active_board_id(&store)?;

    match cmd {
        ListCommands::Add { title } => {
            let title = input::required("List title", &title)?;
            let id = applied(store.add_list(&board_id, &title), "add list")?;
            println!(
                "{} Added list: {} ({})",
                "✓".green().bold(),
                title.cyan(),
                id.dimmed()
            );
        }

        ListCommands::Rename { list, title } => {
            let title = input::required("List title", &title)?;
            let (list_id, old) = {
                let found = resolve::list(board(&store, &board_id)?, &list)?;
                (found.id.clone(), found.title.clone())
            };
            applied(store.rename_list(&board_id, &list_id, &title), "rename list")?;
            println!(
                "{} Renamed list: {} → {}",
                "✓".green().bold(),
                old.dimmed(),
                title.cyan()
            );
        }

        ListCommands::Delete { list } => {
            let (list_id, title, cards) = {
                let found = resolve::list(board(&store, &board_id)?, &list)?;
                (found.id.clone(), found.title.clone(), found.cards.len())
            };
            applied(store.delete_list(&board_id, &list_id), "delete list")?;
            println!(
                "{} Deleted list: {} ({} card(s))",
                "✓".green().bold(),
                title.cyan(),
                cards
            );
        }

        ListCommands::Move { list, index } => {
            let (mutation, title) = {
                let board = board(&store, &board_id)?;
                let found = resolve::list(board, &list)?;
                (plan_move(board, &found.id, index)?, found.title.clone())
            };

            match mutation {
                Some(mutation) => {
                    applied(store.dispatch(mutation), "move list")?;
                    println!(
                        "{} Moved list {} to position {}",
                        "✓".green().bold(),
                        title.cyan(),
                        index.min(lists_len(&store, &board_id) - 1)
                    );
                }
                None => println!("{} List {} is already there", "·".dimmed(), title.cyan()),
            }
        }
    }

    store.close();
    Ok(())
}

fn board<'a>(store: &'a Store, board_id: &str) -> Result<&'a Board> {
    store
        .board(board_id)
        .ok_or_else(|| anyhow::anyhow!("Active board {} no longer exists", board_id))
}

fn lists_len(store: &Store, board_id: &str) -> usize {
    store.board(board_id).map_or(1, |b| b.lists.len().max(1))
}

/// Drag `list_id` over the list currently at `index` (clamped to the last
/// list) and release it there.
fn plan_move(board: &Board, list_id: &str, index: usize) -> Result<Option<Mutation>> {
    let from = board
        .list_index(list_id)
        .ok_or_else(|| anyhow::anyhow!("List {} is not on board {}", list_id, board.name))?;
    let target = index.min(board.lists.len() - 1);
    let over = &board.lists[target].id;

    let mut gesture = Gesture::new();
    gesture.grab_list(list_id, from)?;
    let mutation = gesture.enter_list(over, board)?;
    gesture.release()?;

    Ok(mutation)
}
