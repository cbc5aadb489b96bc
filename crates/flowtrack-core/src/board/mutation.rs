//! Board mutations as values.

use serde::{Deserialize, Serialize};

use super::model::Card;
use crate::id::generate_id;

/// Content for a new card. The ID is assigned when it is added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCard {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewCard {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach an ID, producing the stored card.
    pub fn into_card(self, id: String) -> Card {
        Card::new(id, self.title, self.description)
    }
}

/// Partial card update. `None` fields are left untouched.
///
/// An empty description clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CardPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }

    /// Merge this patch into `card`.
    pub fn merge_into(&self, card: &mut Card) {
        if let Some(title) = &self.title {
            card.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            card.description = if description.is_empty() {
                None
            } else {
                Some(description.clone())
            };
        }
    }
}

/// Where a card goes: out of `from_list_id`, into `to_list_id` at `to_index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCard {
    pub card_id: String,
    pub from_list_id: String,
    pub to_list_id: String,
    pub to_index: usize,
}

/// Every state change the board store accepts.
///
/// IDs for created entities are generated when the mutation is built, so
/// applying a mutation is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mutation {
    AddBoard {
        board_id: String,
        name: String,
        color: String,
    },
    RenameBoard {
        board_id: String,
        name: String,
    },
    DeleteBoard {
        board_id: String,
    },
    SetActiveBoard {
        board_id: String,
    },
    AddList {
        board_id: String,
        list_id: String,
        title: String,
    },
    RenameList {
        board_id: String,
        list_id: String,
        title: String,
    },
    DeleteList {
        board_id: String,
        list_id: String,
    },
    ReorderLists {
        board_id: String,
        from_index: usize,
        to_index: usize,
    },
    AddCard {
        board_id: String,
        list_id: String,
        card: Card,
    },
    UpdateCard {
        board_id: String,
        list_id: String,
        card_id: String,
        patch: CardPatch,
    },
    DeleteCard {
        board_id: String,
        list_id: String,
        card_id: String,
    },
    MoveCard {
        board_id: String,
        #[serde(flatten)]
        movement: MoveCard,
    },
}

impl Mutation {
    /// New board with a fresh ID.
    pub fn add_board(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self::AddBoard {
            board_id: generate_id(),
            name: name.into(),
            color: color.into(),
        }
    }

    /// New list with a fresh ID.
    pub fn add_list(board_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::AddList {
            board_id: board_id.into(),
            list_id: generate_id(),
            title: title.into(),
        }
    }

    /// New card with a fresh ID.
    pub fn add_card(
        board_id: impl Into<String>,
        list_id: impl Into<String>,
        card: NewCard,
    ) -> Self {
        Self::AddCard {
            board_id: board_id.into(),
            list_id: list_id.into(),
            card: card.into_card(generate_id()),
        }
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddBoard { .. } => "add_board",
            Self::RenameBoard { .. } => "rename_board",
            Self::DeleteBoard { .. } => "delete_board",
            Self::SetActiveBoard { .. } => "set_active_board",
            Self::AddList { .. } => "add_list",
            Self::RenameList { .. } => "rename_list",
            Self::DeleteList { .. } => "delete_list",
            Self::ReorderLists { .. } => "reorder_lists",
            Self::AddCard { .. } => "add_card",
            Self::UpdateCard { .. } => "update_card",
            Self::DeleteCard { .. } => "delete_card",
            Self::MoveCard { .. } => "move_card",
        }
    }

    /// ID of the entity this mutation creates, if any.
    pub fn created_id(&self) -> Option<&str> {
        match self {
            Self::AddBoard { board_id, .. } => Some(board_id),
            Self::AddList { list_id, .. } => Some(list_id),
            Self::AddCard { card, .. } => Some(&card.id),
            _ => None,
        }
    }
}
