//! Drag-and-drop gesture tracking.
//!
//! A gesture moves through `Idle -> Dragging -> Completed`. The typestate
//! values ([`Idle`], [`CardDrag`], [`ListDrag`], [`Completed`]) only expose the
//! transitions that are valid from their state, so dropping without a drag
//! does not compile. [`Gesture`] wraps them for event loops that have to keep
//! the gesture between callbacks; there, invalid transitions return
//! [`DragError`] and leave the gesture unchanged.
//!
//! Gestures never touch the store. They produce [`Mutation`]s for the caller
//! to dispatch.

use thiserror::Error;
use tracing::debug;

use crate::board::model::Board;
use crate::board::mutation::{MoveCard, Mutation};

/// Invalid gesture transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DragError {
    #[error("No drag in progress")]
    NotDragging,

    #[error("A drag is already in progress")]
    AlreadyDragging,

    #[error("Expected a {expected} drag")]
    WrongEntity { expected: &'static str },
}

/// Where a dragged card is released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// On top of a card: the dragged card takes that card's position.
    Card { list_id: String, index: usize },
    /// On a list body: the card goes to the end of the list.
    ListBody { list_id: String },
    /// On the placeholder of an empty list.
    EmptyList { list_id: String },
}

impl DropTarget {
    pub fn list_id(&self) -> &str {
        match self {
            Self::Card { list_id, .. }
            | Self::ListBody { list_id }
            | Self::EmptyList { list_id } => list_id,
        }
    }

    /// Insertion index in the target list.
    fn index(&self, board: &Board) -> usize {
        match self {
            Self::Card { index, .. } => *index,
            Self::ListBody { list_id } => board.list(list_id).map_or(0, |l| l.cards.len()),
            Self::EmptyList { .. } => 0,
        }
    }
}

/// Nothing is being dragged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Idle;

/// A card is being dragged out of `from_list_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDrag {
    pub card_id: String,
    pub from_list_id: String,
}

/// A list is being dragged; `index` is where it currently sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDrag {
    pub list_id: String,
    pub index: usize,
}

/// A finished gesture and the mutation it resolved to, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completed {
    mutation: Option<Mutation>,
}

impl Idle {
    pub fn grab_card(
        self,
        card_id: impl Into<String>,
        from_list_id: impl Into<String>,
    ) -> CardDrag {
        CardDrag {
            card_id: card_id.into(),
            from_list_id: from_list_id.into(),
        }
    }

    pub fn grab_list(self, list_id: impl Into<String>, index: usize) -> ListDrag {
        ListDrag {
            list_id: list_id.into(),
            index,
        }
    }
}

impl CardDrag {
    /// Release the card over `target` on `board`.
    pub fn drop_on(self, target: &DropTarget, board: &Board) -> Completed {
        let to_index = target.index(board);
        debug!(card_id = %self.card_id, to_list = target.list_id(), to_index, "Card dropped");
        Completed {
            mutation: Some(Mutation::MoveCard {
                board_id: board.id.clone(),
                movement: MoveCard {
                    card_id: self.card_id,
                    from_list_id: self.from_list_id,
                    to_list_id: target.list_id().to_string(),
                    to_index,
                },
            }),
        }
    }

    pub fn cancel(self) -> Completed {
        Completed { mutation: None }
    }
}

impl ListDrag {
    /// Hover over another list. When it sits elsewhere, the dragged list
    /// moves into its position and the drag follows it. Nothing happens once
    /// the dragged list is gone from the board.
    pub fn enter(self, over_list_id: &str, board: &Board) -> (ListDrag, Option<Mutation>) {
        let over = board.list_index(over_list_id);
        let from = board.list_index(&self.list_id);
        let (Some(over), Some(from)) = (over, from) else {
            return (self, None);
        };
        if over == from {
            return (ListDrag { index: from, ..self }, None);
        }

        let mutation = Mutation::ReorderLists {
            board_id: board.id.clone(),
            from_index: from,
            to_index: over,
        };
        (ListDrag { index: over, ..self }, Some(mutation))
    }

    pub fn release(self) -> Completed {
        Completed { mutation: None }
    }
}

impl Completed {
    pub fn mutation(&self) -> Option<&Mutation> {
        self.mutation.as_ref()
    }

    pub fn into_mutation(self) -> Option<Mutation> {
        self.mutation
    }

    /// Clear the transient drag state.
    pub fn finish(self) -> Idle {
        Idle
    }
}

/// Runtime gesture state for event-driven callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    Idle(Idle),
    Card(CardDrag),
    List(ListDrag),
}

impl Default for Gesture {
    fn default() -> Self {
        Self::Idle(Idle)
    }
}

impl Gesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle(_))
    }

    /// Start dragging a card.
    pub fn grab_card(&mut self, card_id: &str, from_list_id: &str) -> Result<(), DragError> {
        if !self.is_idle() {
            return Err(DragError::AlreadyDragging);
        }
        *self = Self::Card(Idle.grab_card(card_id, from_list_id));
        Ok(())
    }

    /// Start dragging a list at `index`.
    pub fn grab_list(&mut self, list_id: &str, index: usize) -> Result<(), DragError> {
        if !self.is_idle() {
            return Err(DragError::AlreadyDragging);
        }
        *self = Self::List(Idle.grab_list(list_id, index));
        Ok(())
    }

    /// Hover over a list. Only list drags react; card drags ignore it.
    pub fn enter_list(
        &mut self,
        over_list_id: &str,
        board: &Board,
    ) -> Result<Option<Mutation>, DragError> {
        match std::mem::take(self) {
            Self::Idle(idle) => {
                *self = Self::Idle(idle);
                Err(DragError::NotDragging)
            }
            Self::Card(drag) => {
                *self = Self::Card(drag);
                Ok(None)
            }
            Self::List(drag) => {
                let (drag, mutation) = drag.enter(over_list_id, board);
                *self = Self::List(drag);
                Ok(mutation)
            }
        }
    }

    /// Drop the dragged card and return to idle.
    pub fn drop_card(&mut self, target: &DropTarget, board: &Board) -> Result<Mutation, DragError> {
        match std::mem::take(self) {
            Self::Card(drag) => {
                let completed = drag.drop_on(target, board);
                let mutation = completed.mutation().cloned();
                *self = Self::Idle(completed.finish());
                mutation.ok_or(DragError::NotDragging)
            }
            Self::List(drag) => {
                *self = Self::List(drag);
                Err(DragError::WrongEntity { expected: "card" })
            }
            Self::Idle(idle) => {
                *self = Self::Idle(idle);
                Err(DragError::NotDragging)
            }
        }
    }

    /// End whatever drag is in progress without dropping anything.
    pub fn release(&mut self) -> Result<(), DragError> {
        let completed = match std::mem::take(self) {
            Self::Card(drag) => drag.cancel(),
            Self::List(drag) => drag.release(),
            Self::Idle(idle) => {
                *self = Self::Idle(idle);
                return Err(DragError::NotDragging);
            }
        };
        *self = Self::Idle(completed.finish());
        Ok(())
    }
}
