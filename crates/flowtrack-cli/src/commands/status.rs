//! Board rendering, status and reset.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use dialoguer::Confirm;

use super::{open_pool, open_store, store_over};
use crate::config::Settings;
use crate::output;
use flowtrack_db::queries::slots;

#[derive(Args)]
pub struct ResetArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Render the active board.
pub fn show(settings: &Settings) -> Result<()> {
    let store = open_store(settings);

    match store.active_board() {
        Some(board) => output::print_board(board),
        None if store.boards().is_empty() => println!(
            "{}",
            "No boards. Create one with 'flowtrack board add'.".dimmed()
        ),
        None => println!(
            "{}",
            "No active board. Pick one with 'flowtrack board use <board>'.".dimmed()
        ),
    }

    store.close();
    Ok(())
}

pub fn execute(settings: &Settings) -> Result<()> {
    let pool = open_pool(settings);

    // Slot metadata comes from the row itself; the store only sees its value.
    let slot = pool.as_ref().and_then(|pool| {
        slots::list_slots(pool)
            .map(|all| all.into_iter().find(|s| s.key == settings.slot))
            .unwrap_or_default()
    });
    let store = store_over(pool, settings);

    output::print_status(settings, store.state(), slot.as_ref());
    Ok(())
}

/// Delete the saved snapshot for the configured slot.
pub fn reset(args: ResetArgs, settings: &Settings) -> Result<()> {
    if settings.ephemeral {
        println!("{}", "Nothing to reset in ephemeral mode.".dimmed());
        return Ok(());
    }

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete all boards saved in slot '{}'?",
                settings.slot
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "Cancelled.".dimmed());
            return Ok(());
        }
    }

    let pool = flowtrack_db::init_pool(&settings.db_path)
        .with_context(|| format!("Failed to open {}", settings.db_path.display()))?;
    if slots::delete_slot(&pool, &settings.slot)? {
        println!(
            "{} Cleared slot {}; the next run starts from the demo board",
            "✓".green().bold(),
            settings.slot.cyan()
        );
    } else {
        println!("{} Slot {} was already empty", "·".dimmed(), settings.slot.cyan());
    }
    Ok(())
}
