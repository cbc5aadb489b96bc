//! FlowTrack Core Library
//!
//! Board model, mutation logic, snapshot persistence and drag-and-drop
//! gesture tracking for the FlowTrack kanban board.

pub mod board;
pub mod drag;
pub mod error;
pub mod id;
pub mod input;
pub mod persist;
pub mod store;

pub use board::model::{AppState, Board, Card, List};
pub use board::mutation::{CardPatch, MoveCard, Mutation, NewCard};
pub use error::{FlowResult, FlowtrackError};
pub use persist::{MemoryStorage, SlotStorage};
pub use store::{BoardStore, Outcome};
