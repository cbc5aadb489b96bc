//! Board domain models.
//!
//! The serialized shape of [`AppState`] is the persisted snapshot format:
//! `{"boards": [...], "activeBoardId": "..."}`.

use serde::{Deserialize, Serialize};

/// Whole application state: every board plus the active board pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub boards: Vec<Board>,
    /// Empty only when there are no boards (or after an unchecked switch).
    #[serde(default)]
    pub active_board_id: String,
}

/// A Kanban board containing ordered lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub lists: Vec<List>,
}

/// An ordered column of cards within a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

/// A single work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Colors offered when creating a board. The first one is the default.
pub const BOARD_PALETTE: &[&str] = &[
    "#7c3aed", "#0ea5e9", "#f59e0b", "#22c55e", "#ef4444", "#8b5cf6",
];

/// Default color for new boards.
pub const DEFAULT_BOARD_COLOR: &str = "#7c3aed";

/// Suggested name for a new board.
pub const DEFAULT_BOARD_NAME: &str = "Nuevo tablero";

/// Suggested title for a new list.
pub const DEFAULT_LIST_TITLE: &str = "Nueva lista";

/// Storage slot the application state lives in.
pub const DEFAULT_SLOT: &str = "flowtrack-store";

impl AppState {
    /// Look up a board by ID.
    pub fn board(&self, id: &str) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == id)
    }

    /// The board the active pointer refers to, if it exists.
    pub fn active_board(&self) -> Option<&Board> {
        self.board(&self.active_board_id)
    }

    /// Whether the active pointer satisfies the board invariant.
    pub fn active_pointer_is_valid(&self) -> bool {
        if self.boards.is_empty() {
            self.active_board_id.is_empty()
        } else {
            self.active_board().is_some()
        }
    }

    /// Total number of cards across all boards.
    pub fn card_count(&self) -> usize {
        self.boards.iter().map(Board::card_count).sum()
    }
}

impl Board {
    /// Create an empty board.
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            lists: Vec::new(),
        }
    }

    /// Look up a list by ID.
    pub fn list(&self, id: &str) -> Option<&List> {
        self.lists.iter().find(|l| l.id == id)
    }

    /// Position of a list in display order.
    pub fn list_index(&self, id: &str) -> Option<usize> {
        self.lists.iter().position(|l| l.id == id)
    }

    /// Find a card anywhere on the board, returning its list and index.
    pub fn find_card(&self, card_id: &str) -> Option<(&List, usize)> {
        self.lists
            .iter()
            .find_map(|l| l.card_index(card_id).map(|idx| (l, idx)))
    }

    /// Number of cards across all lists.
    pub fn card_count(&self) -> usize {
        self.lists.iter().map(|l| l.cards.len()).sum()
    }
}

impl List {
    /// Create an empty list.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            cards: Vec::new(),
        }
    }

    /// Look up a card by ID.
    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Position of a card within this list.
    pub fn card_index(&self, id: &str) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }
}

impl Card {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description,
        }
    }
}
