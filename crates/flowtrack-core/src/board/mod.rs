//! Board mutation logic.
//!
//! Every mutation is computed on a copy of the current state; the original
//! snapshot is never touched, so a failed mutation leaves nothing behind.

pub mod model;
pub mod mutation;
pub mod reorder;
pub mod seed;

pub use model::{AppState, Board, Card, List};
pub use mutation::{CardPatch, MoveCard, Mutation, NewCard};

use crate::error::{FlowResult, FlowtrackError};

impl AppState {
    /// Compute the snapshot that results from applying `mutation`.
    pub fn apply(&self, mutation: &Mutation) -> FlowResult<AppState> {
        let mut next = self.clone();
        match mutation {
            Mutation::AddBoard {
                board_id,
                name,
                color,
            } => {
                if next.board(board_id).is_some() {
                    return Err(FlowtrackError::DuplicateId(board_id.clone()));
                }
                next.boards.push(Board::new(board_id.as_str(), name.as_str(), color.as_str()));
                next.active_board_id.clone_from(board_id);
            }
            Mutation::RenameBoard { board_id, name } => {
                next.board_mut(board_id)?.name.clone_from(name);
            }
            Mutation::DeleteBoard { board_id } => next.delete_board(board_id)?,
            Mutation::SetActiveBoard { board_id } => {
                next.active_board_id.clone_from(board_id);
            }
            Mutation::AddList {
                board_id,
                list_id,
                title,
            } => {
                let board = next.board_mut(board_id)?;
                if board.list(list_id).is_some() {
                    return Err(FlowtrackError::DuplicateId(list_id.clone()));
                }
                board.lists.push(List::new(list_id.as_str(), title.as_str()));
            }
            Mutation::RenameList {
                board_id,
                list_id,
                title,
            } => {
                next.board_mut(board_id)?.list_mut(list_id)?.title.clone_from(title);
            }
            Mutation::DeleteList { board_id, list_id } => {
                let board = next.board_mut(board_id)?;
                let idx = board
                    .list_index(list_id)
                    .ok_or_else(|| FlowtrackError::ListNotFound(list_id.clone()))?;
                board.lists.remove(idx);
            }
            Mutation::ReorderLists {
                board_id,
                from_index,
                to_index,
            } => {
                let lists = &mut next.board_mut(board_id)?.lists;
                let len = lists.len();
                if !reorder::move_item(lists, *from_index, *to_index) {
                    return Err(FlowtrackError::IndexOutOfRange {
                        index: *from_index,
                        len,
                    });
                }
            }
            Mutation::AddCard {
                board_id,
                list_id,
                card,
            } => {
                // Cards move between lists, so their ids are unique per board.
                let board = next.board_mut(board_id)?;
                if board.find_card(&card.id).is_some() {
                    return Err(FlowtrackError::DuplicateId(card.id.clone()));
                }
                board.list_mut(list_id)?.cards.push(card.clone());
            }
            Mutation::UpdateCard {
                board_id,
                list_id,
                card_id,
                patch,
            } => {
                let card = next.board_mut(board_id)?.list_mut(list_id)?.card_mut(card_id)?;
                patch.merge_into(card);
            }
            Mutation::DeleteCard {
                board_id,
                list_id,
                card_id,
            } => {
                let list = next.board_mut(board_id)?.list_mut(list_id)?;
                let idx = list
                    .card_index(card_id)
                    .ok_or_else(|| FlowtrackError::CardNotFound(card_id.clone()))?;
                list.cards.remove(idx);
            }
            Mutation::MoveCard { board_id, movement } => {
                next.board_mut(board_id)?.move_card(movement)?;
            }
        }
        Ok(next)
    }

    fn board_mut(&mut self, id: &str) -> FlowResult<&mut Board> {
        self.boards
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| FlowtrackError::BoardNotFound(id.to_string()))
    }

    /// Remove a board. The active pointer moves to the first remaining board
    /// when it pointed at the deleted one (or at nothing valid).
    fn delete_board(&mut self, id: &str) -> FlowResult<()> {
        let idx = self
            .boards
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| FlowtrackError::BoardNotFound(id.to_string()))?;
        self.boards.remove(idx);

        if self.active_board_id == id || self.active_board().is_none() {
            self.active_board_id = self
                .boards
                .first()
                .map(|b| b.id.clone())
                .unwrap_or_default();
        }
        Ok(())
    }
}

impl Board {
    fn list_mut(&mut self, id: &str) -> FlowResult<&mut List> {
        self.lists
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| FlowtrackError::ListNotFound(id.to_string()))
    }

    /// Take the card out of its source list and insert it into the target
    /// list. Both lists are resolved before anything changes.
    fn move_card(&mut self, movement: &MoveCard) -> FlowResult<()> {
        let from = self
            .list_index(&movement.from_list_id)
            .ok_or_else(|| FlowtrackError::ListNotFound(movement.from_list_id.clone()))?;
        let to = self
            .list_index(&movement.to_list_id)
            .ok_or_else(|| FlowtrackError::ListNotFound(movement.to_list_id.clone()))?;
        let pos = self.lists[from]
            .card_index(&movement.card_id)
            .ok_or_else(|| FlowtrackError::CardNotFound(movement.card_id.clone()))?;

        let card = self.lists[from].cards.remove(pos);
        let target = &mut self.lists[to].cards;
        let at = movement.to_index.min(target.len());
        target.insert(at, card);
        Ok(())
    }
}

impl List {
    fn card_mut(&mut self, id: &str) -> FlowResult<&mut Card> {
        self.cards
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| FlowtrackError::CardNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seed::{demo_state, DEMO_BOARD_ID};

    fn list_id(state: &AppState, title: &str) -> String {
        state
            .active_board()
            .unwrap()
            .lists
            .iter()
            .find(|l| l.title == title)
            .unwrap()
            .id
            .clone()
    }

    fn titles(list: &List) -> Vec<&str> {
        list.cards.iter().map(|c| c.title.as_str()).collect()
    }

    #[test]
    fn test_add_board_becomes_active() {
        let state = AppState::default();
        let m = Mutation::add_board("Marketing", "#0ea5e9");
        let next = state.apply(&m).unwrap();

        assert_eq!(next.boards.len(), 1);
        assert_eq!(next.active_board_id, m.created_id().unwrap());
        assert!(next.boards[0].lists.is_empty());
        // Original snapshot is untouched
        assert!(state.boards.is_empty());
    }

    #[test]
    fn test_duplicate_board_id_is_rejected() {
        let m = Mutation::add_board("Marketing", "#0ea5e9");
        let state = AppState::default().apply(&m).unwrap();

        let err = state.apply(&m).unwrap_err();
        let FlowtrackError::DuplicateId(id) = err else {
            panic!("expected a duplicate id error");
        };
        assert_eq!(Some(id.as_str()), m.created_id());
        assert_eq!(state.boards.len(), 1);
    }

    #[test]
    fn test_duplicate_list_id_is_rejected() {
        let state = demo_state();
        let existing = state.boards[0].lists[0].id.clone();
        let err = state
            .apply(&Mutation::AddList {
                board_id: DEMO_BOARD_ID.to_string(),
                list_id: existing,
                title: "Otra".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, FlowtrackError::DuplicateId(_)));
    }

    #[test]
    fn test_duplicate_card_id_is_rejected_across_lists() {
        let state = demo_state();
        let por_hacer = list_id(&state, "Por hacer");
        let hecho = list_id(&state, "Hecho");
        let m = Mutation::add_card(DEMO_BOARD_ID, por_hacer.clone(), NewCard::titled("QA"));
        let state = state.apply(&m).unwrap();

        // Same mutation again
        assert!(matches!(state.apply(&m), Err(FlowtrackError::DuplicateId(_))));

        // Same card id, other list
        let Mutation::AddCard { card, .. } = &m else {
            panic!("expected add_card");
        };
        let elsewhere = Mutation::AddCard {
            board_id: DEMO_BOARD_ID.to_string(),
            list_id: hecho,
            card: card.clone(),
        };
        assert!(matches!(state.apply(&elsewhere), Err(FlowtrackError::DuplicateId(_))));
        assert_eq!(state.active_board().unwrap().card_count(), 5);
    }

    #[test]
    fn test_rename_board() {
        let state = demo_state();
        let next = state
            .apply(&Mutation::RenameBoard {
                board_id: DEMO_BOARD_ID.to_string(),
                name: "Producto 2".to_string(),
            })
            .unwrap();
        assert_eq!(next.boards[0].name, "Producto 2");
        assert_eq!(state.boards[0].name, "Producto");
    }

    #[test]
    fn test_unknown_board_is_rejected() {
        let state = demo_state();
        let err = state
            .apply(&Mutation::RenameBoard {
                board_id: "missing".to_string(),
                name: "x".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, FlowtrackError::BoardNotFound(id) if id == "missing"));
    }

    #[test]
    fn test_delete_active_board_promotes_first_remaining() {
        let state = demo_state();
        let second = Mutation::add_board("Segundo", "#22c55e");
        let third = Mutation::add_board("Tercero", "#ef4444");
        let state = state.apply(&second).unwrap().apply(&third).unwrap();
        assert_eq!(state.active_board_id, third.created_id().unwrap());

        let next = state
            .apply(&Mutation::DeleteBoard {
                board_id: third.created_id().unwrap().to_string(),
            })
            .unwrap();
        assert_eq!(next.active_board_id, DEMO_BOARD_ID);
    }

    // Deleting some other board leaves the selection alone instead of
    // jumping back to the first board.
    #[test]
    fn test_delete_inactive_board_keeps_pointer() {
        let second = Mutation::add_board("Segundo", "#22c55e");
        let state = demo_state().apply(&second).unwrap();

        let next = state
            .apply(&Mutation::DeleteBoard {
                board_id: DEMO_BOARD_ID.to_string(),
            })
            .unwrap();
        assert_eq!(next.active_board_id, second.created_id().unwrap());
    }

    #[test]
    fn test_delete_only_board_clears_pointer() {
        let next = demo_state()
            .apply(&Mutation::DeleteBoard {
                board_id: DEMO_BOARD_ID.to_string(),
            })
            .unwrap();
        assert!(next.boards.is_empty());
        assert_eq!(next.active_board_id, "");
    }

    #[test]
    fn test_set_active_board_is_unchecked() {
        let next = demo_state()
            .apply(&Mutation::SetActiveBoard {
                board_id: "ghost".to_string(),
            })
            .unwrap();
        assert_eq!(next.active_board_id, "ghost");
        assert!(next.active_board().is_none());
    }

    #[test]
    fn test_add_rename_delete_list() {
        let state = demo_state();
        let add = Mutation::add_list(DEMO_BOARD_ID, "Bloqueado");
        let state = state.apply(&add).unwrap();
        let board = state.active_board().unwrap();
        assert_eq!(board.lists.len(), 4);
        assert_eq!(board.lists[3].title, "Bloqueado");
        assert!(board.lists[3].cards.is_empty());

        let new_id = add.created_id().unwrap().to_string();
        let state = state
            .apply(&Mutation::RenameList {
                board_id: DEMO_BOARD_ID.to_string(),
                list_id: new_id.clone(),
                title: "En espera".to_string(),
            })
            .unwrap();
        assert_eq!(state.active_board().unwrap().lists[3].title, "En espera");

        let state = state
            .apply(&Mutation::DeleteList {
                board_id: DEMO_BOARD_ID.to_string(),
                list_id: new_id.clone(),
            })
            .unwrap();
        let board = state.active_board().unwrap();
        assert_eq!(board.lists.len(), 3);
        assert_eq!(board.lists[2].title, "Hecho");

        let err = state
            .apply(&Mutation::DeleteList {
                board_id: DEMO_BOARD_ID.to_string(),
                list_id: new_id,
            })
            .unwrap_err();
        assert!(matches!(err, FlowtrackError::ListNotFound(_)));
    }

    #[test]
    fn test_reorder_lists_moves_single_element() {
        let state = demo_state();
        let next = state
            .apply(&Mutation::ReorderLists {
                board_id: DEMO_BOARD_ID.to_string(),
                from_index: 0,
                to_index: 2,
            })
            .unwrap();
        let order: Vec<&str> = next
            .active_board()
            .unwrap()
            .lists
            .iter()
            .map(|l| l.title.as_str())
            .collect();
        assert_eq!(order, vec!["En progreso", "Hecho", "Por hacer"]);
    }

    #[test]
    fn test_reorder_lists_round_trip() {
        let state = demo_state();
        let there = Mutation::ReorderLists {
            board_id: DEMO_BOARD_ID.to_string(),
            from_index: 1,
            to_index: 2,
        };
        let back = Mutation::ReorderLists {
            board_id: DEMO_BOARD_ID.to_string(),
            from_index: 2,
            to_index: 1,
        };
        let next = state.apply(&there).unwrap().apply(&back).unwrap();
        assert_eq!(next, state);
    }

    #[test]
    fn test_reorder_lists_index_policy() {
        let state = demo_state();
        let err = state
            .apply(&Mutation::ReorderLists {
                board_id: DEMO_BOARD_ID.to_string(),
                from_index: 3,
                to_index: 0,
            })
            .unwrap_err();
        assert!(matches!(err, FlowtrackError::IndexOutOfRange { index: 3, len: 3 }));

        let clamped = state
            .apply(&Mutation::ReorderLists {
                board_id: DEMO_BOARD_ID.to_string(),
                from_index: 0,
                to_index: 42,
            })
            .unwrap();
        assert_eq!(clamped.active_board().unwrap().lists[2].title, "Por hacer");
    }

    #[test]
    fn test_add_card_appends() {
        let state = demo_state();
        let por_hacer = list_id(&state, "Por hacer");
        let m = Mutation::add_card(
            DEMO_BOARD_ID,
            por_hacer.clone(),
            NewCard::titled("Plan de QA").with_description("casos críticos"),
        );
        let next = state.apply(&m).unwrap();
        let list = next.active_board().unwrap().list(&por_hacer).unwrap();
        assert_eq!(
            titles(list),
            vec!["Redactar especificación", "Mapa de stakeholders", "Plan de QA"]
        );
        assert_eq!(list.cards[2].id, m.created_id().unwrap());
        assert_eq!(list.cards[2].description.as_deref(), Some("casos críticos"));
    }

    #[test]
    fn test_update_card_partial_merge() {
        let state = demo_state();
        let en_progreso = list_id(&state, "En progreso");
        let card_id = state.active_board().unwrap().list(&en_progreso).unwrap().cards[0].id.clone();

        let next = state
            .apply(&Mutation::UpdateCard {
                board_id: DEMO_BOARD_ID.to_string(),
                list_id: en_progreso.clone(),
                card_id: card_id.clone(),
                patch: CardPatch {
                    title: Some("Diseño UI v2".to_string()),
                    description: None,
                },
            })
            .unwrap();
        let card = next.active_board().unwrap().list(&en_progreso).unwrap().card(&card_id).unwrap();
        assert_eq!(card.title, "Diseño UI v2");
        assert_eq!(card.description.as_deref(), Some("Explorar variantes del dashboard"));
    }

    #[test]
    fn test_update_card_in_wrong_list_is_rejected() {
        let state = demo_state();
        let hecho = list_id(&state, "Hecho");
        let card_id = state.active_board().unwrap().lists[0].cards[0].id.clone();

        let err = state
            .apply(&Mutation::UpdateCard {
                board_id: DEMO_BOARD_ID.to_string(),
                list_id: hecho,
                card_id,
                patch: CardPatch::default(),
            })
            .unwrap_err();
        assert!(matches!(err, FlowtrackError::CardNotFound(_)));
    }

    #[test]
    fn test_delete_card() {
        let state = demo_state();
        let por_hacer = list_id(&state, "Por hacer");
        let card_id = state.active_board().unwrap().lists[0].cards[0].id.clone();

        let next = state
            .apply(&Mutation::DeleteCard {
                board_id: DEMO_BOARD_ID.to_string(),
                list_id: por_hacer.clone(),
                card_id,
            })
            .unwrap();
        let list = next.active_board().unwrap().list(&por_hacer).unwrap();
        assert_eq!(titles(list), vec!["Mapa de stakeholders"]);
    }

    #[test]
    fn test_move_card_between_lists() {
        // "Redactar especificación" from "Por hacer" (index 0) to "Hecho" at index 1.
        let state = demo_state();
        let por_hacer = list_id(&state, "Por hacer");
        let hecho = list_id(&state, "Hecho");
        let add = Mutation::add_card(DEMO_BOARD_ID, hecho.clone(), NewCard::titled("Retro"));
        let state = state.apply(&add).unwrap();
        let card = state.active_board().unwrap().lists[0].cards[0].clone();
        assert_eq!(card.title, "Redactar especificación");

        let next = state
            .apply(&Mutation::MoveCard {
                board_id: DEMO_BOARD_ID.to_string(),
                movement: MoveCard {
                    card_id: card.id.clone(),
                    from_list_id: por_hacer.clone(),
                    to_list_id: hecho.clone(),
                    to_index: 1,
                },
            })
            .unwrap();

        let board = next.active_board().unwrap();
        assert_eq!(titles(board.list(&por_hacer).unwrap()), vec!["Mapa de stakeholders"]);
        assert_eq!(
            titles(board.list(&hecho).unwrap()),
            vec!["Kickoff con equipo", "Redactar especificación", "Retro"]
        );
        assert_eq!(board.list(&hecho).unwrap().cards[1], card);
        assert_eq!(board.card_count(), state.active_board().unwrap().card_count());
        let occurrences = board
            .lists
            .iter()
            .flat_map(|l| &l.cards)
            .filter(|c| c.id == card.id)
            .count();
        assert_eq!(occurrences, 1);
    }

    #[test]
    fn test_move_card_within_same_list() {
        let state = demo_state();
        let por_hacer = list_id(&state, "Por hacer");
        let first = state.active_board().unwrap().lists[0].cards[0].id.clone();

        let next = state
            .apply(&Mutation::MoveCard {
                board_id: DEMO_BOARD_ID.to_string(),
                movement: MoveCard {
                    card_id: first,
                    from_list_id: por_hacer.clone(),
                    to_list_id: por_hacer.clone(),
                    to_index: 1,
                },
            })
            .unwrap();
        let list = next.active_board().unwrap().list(&por_hacer).unwrap();
        assert_eq!(titles(list), vec!["Mapa de stakeholders", "Redactar especificación"]);
    }

    #[test]
    fn test_move_card_clamps_index() {
        let state = demo_state();
        let por_hacer = list_id(&state, "Por hacer");
        let hecho = list_id(&state, "Hecho");
        let first = state.active_board().unwrap().lists[0].cards[0].id.clone();

        let next = state
            .apply(&Mutation::MoveCard {
                board_id: DEMO_BOARD_ID.to_string(),
                movement: MoveCard {
                    card_id: first,
                    from_list_id: por_hacer,
                    to_list_id: hecho.clone(),
                    to_index: 100,
                },
            })
            .unwrap();
        let list = next.active_board().unwrap().list(&hecho).unwrap();
        assert_eq!(titles(list), vec!["Kickoff con equipo", "Redactar especificación"]);
    }

    #[test]
    fn test_move_card_misses_are_rejected() {
        let state = demo_state();
        let por_hacer = list_id(&state, "Por hacer");
        let hecho = list_id(&state, "Hecho");
        let first = state.active_board().unwrap().lists[0].cards[0].id.clone();

        let attempt = |board: &str, from: &str, to: &str, card: &str| {
            state.apply(&Mutation::MoveCard {
                board_id: board.to_string(),
                movement: MoveCard {
                    card_id: card.to_string(),
                    from_list_id: from.to_string(),
                    to_list_id: to.to_string(),
                    to_index: 0,
                },
            })
        };

        assert!(matches!(
            attempt("nope", &por_hacer, &hecho, &first),
            Err(FlowtrackError::BoardNotFound(_))
        ));
        assert!(matches!(
            attempt(DEMO_BOARD_ID, "nope", &hecho, &first),
            Err(FlowtrackError::ListNotFound(_))
        ));
        assert!(matches!(
            attempt(DEMO_BOARD_ID, &por_hacer, "nope", &first),
            Err(FlowtrackError::ListNotFound(_))
        ));
        // Card exists, but not in the claimed source list
        assert!(matches!(
            attempt(DEMO_BOARD_ID, &hecho, &por_hacer, &first),
            Err(FlowtrackError::CardNotFound(_))
        ));
    }
}
