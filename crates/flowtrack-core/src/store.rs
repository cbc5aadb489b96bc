//! The board store: owns the application state and persists it after every
//! mutation.
//!
//! The store is constructed explicitly and handed to whatever drives it.
//! `open` loads the saved snapshot, `close` writes a final one and returns the
//! storage backend.

use tracing::{debug, info};

use crate::board::model::{AppState, Board};
use crate::board::mutation::{CardPatch, MoveCard, Mutation, NewCard};
use crate::board::seed::demo_state;
use crate::error::{FlowResult, FlowtrackError};
use crate::persist::{self, SlotStorage};

/// Result of a store operation.
///
/// Mutations that hit an unknown ID (or an out-of-range index) leave the
/// state as it was; the reason is carried here for callers that care.
#[derive(Debug)]
pub enum Outcome<T = ()> {
    Applied(T),
    Unchanged(FlowtrackError),
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// The value, if the mutation was applied.
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Unchanged(_) => None,
        }
    }

    pub fn into_result(self) -> FlowResult<T> {
        match self {
            Self::Applied(value) => Ok(value),
            Self::Unchanged(e) => Err(e),
        }
    }
}

/// Owns the application state and the slot it is persisted to.
pub struct BoardStore<S: SlotStorage> {
    storage: S,
    key: String,
    state: AppState,
    /// Set once a mutation is applied. Until then the slot is never written,
    /// so a fallback state cannot overwrite what is stored.
    dirty: bool,
}

impl<S: SlotStorage> BoardStore<S> {
    /// Load the snapshot stored under `key`, falling back to the demo board.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let state = persist::load(&storage, &key, demo_state());
        info!(key = %key, boards = state.boards.len(), "Board store opened");
        Self {
            storage,
            key,
            state,
            dirty: false,
        }
    }

    /// Start from a given state instead of the stored snapshot. The state is
    /// saved on `close` even if nothing changes.
    pub fn with_state(storage: S, key: impl Into<String>, state: AppState) -> Self {
        Self {
            storage,
            key: key.into(),
            state,
            dirty: true,
        }
    }

    /// Give the storage back, writing a final snapshot if anything changed.
    pub fn close(mut self) -> S {
        if self.dirty {
            self.persist();
        }
        debug!(key = %self.key, dirty = self.dirty, "Board store closed");
        self.storage
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn boards(&self) -> &[Board] {
        &self.state.boards
    }

    pub fn active_board_id(&self) -> &str {
        &self.state.active_board_id
    }

    pub fn active_board(&self) -> Option<&Board> {
        self.state.active_board()
    }

    pub fn board(&self, id: &str) -> Option<&Board> {
        self.state.board(id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Apply a mutation. On success the new snapshot replaces the old one and
    /// is saved; otherwise nothing changes.
    pub fn dispatch(&mut self, mutation: Mutation) -> Outcome {
        match self.state.apply(&mutation) {
            Ok(next) => {
                self.state = next;
                self.dirty = true;
                self.persist();
                debug!(mutation = mutation.kind(), "Mutation applied");
                Outcome::Applied(())
            }
            Err(e) => {
                debug!(
                    mutation = mutation.kind(),
                    not_found = e.is_not_found(),
                    error = %e,
                    "Mutation ignored"
                );
                Outcome::Unchanged(e)
            }
        }
    }

    /// Dispatch a creating mutation and hand back the new entity's ID.
    fn create(&mut self, mutation: Mutation) -> Outcome<String> {
        let id = mutation.created_id().map(str::to_string).unwrap_or_default();
        match self.dispatch(mutation) {
            Outcome::Applied(()) => Outcome::Applied(id),
            Outcome::Unchanged(e) => Outcome::Unchanged(e),
        }
    }

    fn persist(&mut self) {
        persist::save(&mut self.storage, &self.key, &self.state);
    }

    /// Create a board and make it active.
    pub fn add_board(&mut self, name: &str, color: &str) -> Outcome<String> {
        self.create(Mutation::add_board(name, color))
    }

    pub fn rename_board(&mut self, id: &str, name: &str) -> Outcome {
        self.dispatch(Mutation::RenameBoard {
            board_id: id.to_string(),
            name: name.to_string(),
        })
    }

    pub fn delete_board(&mut self, id: &str) -> Outcome {
        self.dispatch(Mutation::DeleteBoard {
            board_id: id.to_string(),
        })
    }

    /// Switch the active board. The ID is not checked.
    pub fn set_active_board(&mut self, id: &str) -> Outcome {
        self.dispatch(Mutation::SetActiveBoard {
            board_id: id.to_string(),
        })
    }

    pub fn add_list(&mut self, board_id: &str, title: &str) -> Outcome<String> {
        self.create(Mutation::add_list(board_id, title))
    }

    pub fn rename_list(&mut self, board_id: &str, list_id: &str, title: &str) -> Outcome {
        self.dispatch(Mutation::RenameList {
            board_id: board_id.to_string(),
            list_id: list_id.to_string(),
            title: title.to_string(),
        })
    }

    pub fn delete_list(&mut self, board_id: &str, list_id: &str) -> Outcome {
        self.dispatch(Mutation::DeleteList {
            board_id: board_id.to_string(),
            list_id: list_id.to_string(),
        })
    }

    /// Move the list at `from_index` to `to_index`.
    pub fn reorder_lists(&mut self, board_id: &str, from_index: usize, to_index: usize) -> Outcome {
        self.dispatch(Mutation::ReorderLists {
            board_id: board_id.to_string(),
            from_index,
            to_index,
        })
    }

    /// Append a card to the end of a list.
    pub fn add_card(&mut self, board_id: &str, list_id: &str, card: NewCard) -> Outcome<String> {
        self.create(Mutation::add_card(board_id, list_id, card))
    }

    pub fn update_card(
        &mut self,
        board_id: &str,
        list_id: &str,
        card_id: &str,
        patch: CardPatch,
    ) -> Outcome {
        self.dispatch(Mutation::UpdateCard {
            board_id: board_id.to_string(),
            list_id: list_id.to_string(),
            card_id: card_id.to_string(),
            patch,
        })
    }

    pub fn delete_card(&mut self, board_id: &str, list_id: &str, card_id: &str) -> Outcome {
        self.dispatch(Mutation::DeleteCard {
            board_id: board_id.to_string(),
            list_id: list_id.to_string(),
            card_id: card_id.to_string(),
        })
    }

    pub fn move_card(&mut self, board_id: &str, movement: MoveCard) -> Outcome {
        self.dispatch(Mutation::MoveCard {
            board_id: board_id.to_string(),
            movement,
        })
    }
}
