//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use unicode_width::UnicodeWidthStr;

use crate::config::Settings;
use crate::resolve::CardRef;
use flowtrack_core::{AppState, Board, List};
use flowtrack_db::queries::slots::SlotInfo;

/// Parse `#rrggbb` into its components.
fn hex_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Paint `text` in the board color, or leave it bold when the color is not hex.
fn in_board_color(text: &str, color: &str) -> ColoredString {
    match hex_rgb(color) {
        Some((r, g, b)) => text.truecolor(r, g, b).bold(),
        None => text.bold(),
    }
}

/// First eight characters of an id.
fn short_id(id: &str) -> &str {
    id.char_indices().nth(8).map_or(id, |(i, _)| &id[..i])
}

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}

/// List header text, e.g. `Por hacer 2`.
fn list_header_plain(list: &List, max_width: usize) -> String {
    let suffix = format!(" {}", list.cards.len());
    let suffix_width = UnicodeWidthStr::width(suffix.as_str());
    let title_budget = max_width.saturating_sub(suffix_width).max(1);
    format!("{}{}", truncate_visual(&list.title, title_budget), suffix)
}

/// One card cell in the wide layout, padded to `width`.
fn format_card_cell(title: &str, width: usize) -> String {
    // bullet + space + title
    let title_width = width.saturating_sub(3).max(1);
    let title = truncate_visual(title, title_width);
    format!(" • {}", pad_right(&title, title_width))
}

fn border(left: &str, mid: &str, right: &str, columns: usize, col_width: usize) {
    print!("{}", left.dimmed());
    for i in 0..columns {
        print!("{}", "─".repeat(col_width).dimmed());
        if i < columns - 1 {
            print!("{}", mid.dimmed());
        }
    }
    println!("{}", right.dimmed());
}

/// Print a board with its lists.
pub fn print_board(board: &Board) {
    println!(
        "{} {} {}",
        in_board_color("■", &board.color),
        board.name.bold(),
        format!("({})", short_id(&board.id)).dimmed()
    );

    if board.lists.is_empty() {
        println!(
            "{}",
            "No lists yet. Add one with 'flowtrack list add <title>'.".dimmed()
        );
        return;
    }

    let width = term_width();
    let needed = board.lists.len() * 13 + 1;

    if width < 60 || width < needed {
        print_board_compact(board);
    } else {
        print_board_wide(board, width);
    }
}

/// Lists side by side.
fn print_board_wide(board: &Board, term_w: usize) {
    let num_cols = board.lists.len();
    // Distribute width: subtract borders (num_cols + 1 border chars)
    let available = term_w.saturating_sub(num_cols + 1);
    let col_width = (available / num_cols).clamp(12, 35);

    border("┌", "┬", "┐", num_cols, col_width);

    print!("{}", "│".dimmed());
    for (i, list) in board.lists.iter().enumerate() {
        let header = list_header_plain(list, col_width);
        let padding = col_width.saturating_sub(UnicodeWidthStr::width(header.as_str()));
        let left_pad = padding / 2;
        let right_pad = padding - left_pad;
        print!(
            "{}{}{}",
            " ".repeat(left_pad),
            header.cyan().bold(),
            " ".repeat(right_pad)
        );
        if i < num_cols - 1 {
            print!("{}", "│".dimmed());
        }
    }
    println!("{}", "│".dimmed());

    border("├", "┼", "┤", num_cols, col_width);

    // Empty lists still get one row for their drop placeholder.
    let rows = board
        .lists
        .iter()
        .map(|l| l.cards.len())
        .max()
        .unwrap_or(0)
        .max(1);

    for row in 0..rows {
        print!("{}", "│".dimmed());
        for (ci, list) in board.lists.iter().enumerate() {
            match list.cards.get(row) {
                Some(card) => print!("{}", format_card_cell(&card.title, col_width)),
                None if row == 0 => {
                    let placeholder = pad_right(" (empty)", col_width);
                    print!("{}", placeholder.dimmed());
                }
                None => print!("{}", " ".repeat(col_width)),
            }
            if ci < num_cols - 1 {
                print!("{}", "│".dimmed());
            }
        }
        println!("{}", "│".dimmed());
    }

    border("└", "┴", "┘", num_cols, col_width);
    print_summary(board);
}

/// Compact vertical layout for narrow terminals.
fn print_board_compact(board: &Board) {
    println!();
    for list in &board.lists {
        println!(
            " {} {} {}",
            "▸".dimmed(),
            list.title.cyan().bold(),
            list.cards.len().to_string().dimmed()
        );

        if list.cards.is_empty() {
            println!("   {}", "(empty)".dimmed());
        }
        for card in &list.cards {
            println!("   • {} {}", card.title, short_id(&card.id).dimmed());
        }
        println!();
    }
    print_summary(board);
}

fn print_summary(board: &Board) {
    println!(
        " {} {} cards {} {} lists",
        in_board_color("■", &board.color),
        board.card_count().to_string().bold(),
        "·".dimmed(),
        board.lists.len().to_string().bold()
    );
}

/// Print boards as a table, marking the active one.
pub fn print_boards_table(state: &AppState) {
    if state.boards.is_empty() {
        println!(
            "{}",
            "No boards. Create one with 'flowtrack board add'.".dimmed()
        );
        return;
    }

    println!("  {:<10} {:<28} {:<8} {:>6} {:>6}", "ID", "Name", "Color", "Lists", "Cards");
    println!("{}", "─".repeat(64));

    for board in &state.boards {
        let marker = if board.id == state.active_board_id {
            "▶".green().bold()
        } else {
            " ".normal()
        };
        println!(
            "{} {:<10} {} {} {:>6} {:>6}",
            marker,
            short_id(&board.id),
            pad_right(&truncate_visual(&board.name, 28), 28),
            in_board_color(&format!("{:<8}", board.color), &board.color),
            board.lists.len(),
            board.card_count()
        );
    }

    println!();
    println!("{} board(s) total", state.boards.len());
}

/// Print a single card.
pub fn print_card(board: &Board, found: &CardRef<'_>) {
    println!(
        "{} {}",
        found.card.title.cyan().bold(),
        format!("({})", found.card.id).dimmed()
    );
    println!();
    println!(
        "{}: {} › {} (position {})",
        "Location".bold(),
        in_board_color(&board.name, &board.color),
        found.list.title,
        found.index + 1
    );

    match &found.card.description {
        Some(desc) => {
            println!();
            println!("{}", desc);
        }
        None => println!("{}", "No description.".dimmed()),
    }
}

/// Print where the state lives and how much of it there is.
pub fn print_status(settings: &Settings, state: &AppState, slot: Option<&SlotInfo>) {
    println!("{}", "FlowTrack Status".bold());
    println!();

    if settings.ephemeral {
        println!("  {:<14} {}", "Storage", "in-memory (not saved)".yellow());
    } else {
        println!("  {:<14} {}", "Database", settings.db_path.display());
    }
    println!("  {:<14} {}", "Slot", settings.slot);

    match slot {
        Some(info) => println!(
            "  {:<14} {} bytes, saved {}",
            "Snapshot",
            info.bytes,
            info.updated_at.dimmed()
        ),
        None if !settings.ephemeral => {
            println!("  {:<14} {}", "Snapshot", "none yet".dimmed())
        }
        None => {}
    }

    println!();
    let active = state
        .active_board()
        .map_or_else(|| "none".dimmed(), |b| in_board_color(&b.name, &b.color));
    println!("  {:<14} {}", "Active board", active);
    println!("  {:<14} {}", "Boards", state.boards.len());
    println!(
        "  {:<14} {}",
        "Lists",
        state.boards.iter().map(|b| b.lists.len()).sum::<usize>()
    );
    println!("  {:<14} {}", "Cards", state.card_count());
}
