//! Demo content used when no saved state exists.

use super::model::{AppState, Board, Card, List, DEFAULT_BOARD_COLOR};
use crate::id::generate_id;

/// ID of the demo board.
pub const DEMO_BOARD_ID: &str = "product";

/// The state a fresh installation starts with.
pub fn demo_state() -> AppState {
    let lists = vec![
        list(
            "Por hacer",
            &[
                ("Redactar especificación", "Definir alcance y entregables"),
                ("Mapa de stakeholders", "Identificar áreas clave"),
            ],
        ),
        list(
            "En progreso",
            &[("Diseño UI", "Explorar variantes del dashboard")],
        ),
        list(
            "Hecho",
            &[("Kickoff con equipo", "Notas compartidas en Notion")],
        ),
    ];

    AppState {
        boards: vec![Board {
            id: DEMO_BOARD_ID.to_string(),
            name: "Producto".to_string(),
            color: DEFAULT_BOARD_COLOR.to_string(),
            lists,
        }],
        active_board_id: DEMO_BOARD_ID.to_string(),
    }
}

fn list(title: &str, cards: &[(&str, &str)]) -> List {
    List {
        id: generate_id(),
        title: title.to_string(),
        cards: cards
            .iter()
            .map(|(title, description)| {
                Card::new(generate_id(), *title, Some(description.to_string()))
            })
            .collect(),
    }
}
