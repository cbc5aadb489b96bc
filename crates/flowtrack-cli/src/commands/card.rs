//! Card commands on the active board.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use super::{active_board_id, applied, open_store, Store};
use crate::config::Settings;
use crate::{output, resolve};
use flowtrack_core::drag::{DropTarget, Gesture};
use flowtrack_core::{input, Board, CardPatch, Mutation, NewCard};

#[derive(Subcommand)]
pub enum CardCommands {
    /// Add a card to the end of a list
    Add(AddCardArgs),

    /// Change a card's title or description
    Edit(EditCardArgs),

    /// Delete a card
    Delete {
        /// Card id, id prefix or title
        card: String,
    },

    /// Drag a card to a list
    Move(MoveCardArgs),

    /// Show a card in full
    Show {
        /// Card id, id prefix or title
        card: String,
    },
}

#[derive(Args)]
pub struct AddCardArgs {
    /// List id, id prefix or title
    pub list: String,

    /// Card title
    pub title: String,

    /// Card description
    #[arg(short, long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct EditCardArgs {
    /// Card id, id prefix or title
    pub card: String,

    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    /// New description; pass an empty string to clear it
    #[arg(short, long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct MoveCardArgs {
    /// Card id, id prefix or title
    pub card: String,

    /// Target list id, id prefix or title
    pub to_list: String,

    /// Zero-based position in the target list (defaults to the end)
    #[arg(short, long)]
    pub index: Option<usize>,
}

pub fn execute(cmd: CardCommands, settings: &Settings) -> Result<()> {
    let mut store = open_store(settings);
    let board_id = active_board_id(&store)?;

    match cmd {
        CardCommands::Add(args) => {
            let title = input::required("Card title", &args.title)?;
            let (list_id, list_title) = {
                let found = resolve::list(board(&store, &board_id)?, &args.list)?;
                (found.id.clone(), found.title.clone())
            };

            let mut card = NewCard::titled(title.clone());
            if let Some(description) = input::optional(args.description.as_deref()) {
                card = card.with_description(description);
            }
            let id = applied(store.add_card(&board_id, &list_id, card), "add card")?;

            println!(
                "{} Added card: {} to {} ({})",
                "✓".green().bold(),
                title.cyan(),
                list_title.bold(),
                id.dimmed()
            );
        }

        CardCommands::Edit(args) => {
            let patch = patch_from(&args)?;
            let (list_id, card_id) = {
                let found = resolve::card(board(&store, &board_id)?, &args.card)?;
                (found.list.id.clone(), found.card.id.clone())
            };
            applied(
                store.update_card(&board_id, &list_id, &card_id, patch),
                "update card",
            )?;

            let title = board(&store, &board_id)?
                .list(&list_id)
                .and_then(|l| l.card(&card_id))
                .map(|c| c.title.clone())
                .unwrap_or_default();
            println!("{} Updated card: {}", "✓".green().bold(), title.cyan());
        }

        CardCommands::Delete { card } => {
            let (list_id, card_id, title) = {
                let found = resolve::card(board(&store, &board_id)?, &card)?;
                (
                    found.list.id.clone(),
                    found.card.id.clone(),
                    found.card.title.clone(),
                )
            };
            applied(store.delete_card(&board_id, &list_id, &card_id), "delete card")?;
            println!("{} Deleted card: {}", "✓".green().bold(), title.cyan());
        }

        CardCommands::Move(args) => {
            let (mutation, title, to_title) = {
                let board = board(&store, &board_id)?;
                let found = resolve::card(board, &args.card)?;
                let to_list = resolve::list(board, &args.to_list)?;
                (
                    plan_move(board, &found.card.id, &to_list.id, args.index)?,
                    found.card.title.clone(),
                    to_list.title.clone(),
                )
            };
            applied(store.dispatch(mutation), "move card")?;
            println!(
                "{} Moved card: {} → {}",
                "✓".green().bold(),
                title.cyan(),
                to_title.bold()
            );
        }

        CardCommands::Show { card } => {
            let board = board(&store, &board_id)?;
            let found = resolve::card(board, &card)?;
            output::print_card(board, &found);
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

/// Build the patch for `card edit`. A given title must not be blank; an
/// empty description clears it.
fn patch_from(args: &EditCardArgs) -> Result<CardPatch> {
    let patch = CardPatch {
        title: args
            .title
            .as_deref()
            .map(|t| input::required("Card title", t))
            .transpose()?,
        description: args.description.as_deref().map(|d| d.trim().to_string()),
    };
    if patch.is_empty() {
        bail!("Nothing to change; pass --title or --description");
    }
    Ok(patch)
}

/// Grab the card and drop it on `to_list_id`: onto the card at `index`, or
/// onto the list body when no index is given.
fn plan_move(
    board: &Board,
    card_id: &str,
    to_list_id: &str,
    index: Option<usize>,
) -> Result<Mutation> {
    let (from, _) = board
        .find_card(card_id)
        .ok_or_else(|| anyhow::anyhow!("Card {} is not on board {}", card_id, board.name))?;
    let to = board
        .list(to_list_id)
        .ok_or_else(|| anyhow::anyhow!("List {} is not on board {}", to_list_id, board.name))?;

    let target = match index {
        _ if to.cards.is_empty() => DropTarget::EmptyList {
            list_id: to.id.clone(),
        },
        Some(index) => DropTarget::Card {
            list_id: to.id.clone(),
            index,
        },
        None => DropTarget::ListBody {
            list_id: to.id.clone(),
        },
    };

    let mut gesture = Gesture::new();
    gesture.grab_card(card_id, &from.id)?;
    Ok(gesture.drop_card(&target, board)?)
}
