//! Resolve user-typed references to boards, lists and cards.
//!
//! A reference matches an exact id first, then a case-insensitive name,
//! then a unique id prefix.

use anyhow::{bail, Result};

use flowtrack_core::{Board, Card, List};

fn find<'a, T>(
    kind: &str,
    items: impl IntoIterator<Item = &'a T> + Clone,
    reference: &str,
    id: impl Fn(&T) -> &str,
    name: impl Fn(&T) -> &str,
) -> Result<&'a T>
where
    T: 'a,
{
    let reference = reference.trim();
    if reference.is_empty() {
        bail!("{} reference must not be empty", kind);
    }

    if let Some(hit) = items.clone().into_iter().find(|item| id(item) == reference) {
        return Ok(hit);
    }

    let lowered = reference.to_lowercase();
    let by_name: Vec<&T> = items
        .clone()
        .into_iter()
        .filter(|item| name(item).to_lowercase() == lowered)
        .collect();
    match by_name.as_slice() {
        [one] => return Ok(*one),
        [] => {}
        many => bail!(
            "{} name '{}' is ambiguous ({} matches); use the id instead",
            kind,
            reference,
            many.len()
        ),
    }

    let by_prefix: Vec<&T> = items
        .into_iter()
        .filter(|item| id(item).starts_with(reference))
        .collect();
    match by_prefix.as_slice() {
        [one] => Ok(*one),
        [] => bail!("No {} matches '{}'", kind.to_lowercase(), reference),
        many => bail!(
            "{} id prefix '{}' is ambiguous ({} matches)",
            kind,
            reference,
            many.len()
        ),
    }
}

pub fn board<'a>(boards: &'a [Board], reference: &str) -> Result<&'a Board> {
    find(
        "Board",
        boards,
        reference,
        |b: &Board| b.id.as_str(),
        |b: &Board| b.name.as_str(),
    )
}

pub fn list<'a>(board: &'a Board, reference: &str) -> Result<&'a List> {
    find(
        "List",
        &board.lists,
        reference,
        |l: &List| l.id.as_str(),
        |l: &List| l.title.as_str(),
    )
}

/// A card and the list that holds it.
#[derive(Debug, Clone, Copy)]
pub struct CardRef<'a> {
    pub list: &'a List,
    pub card: &'a Card,
    pub index: usize,
}

pub fn card<'a>(board: &'a Board, reference: &str) -> Result<CardRef<'a>> {
    let cards: Vec<CardRef<'a>> = board
        .lists
        .iter()
        .flat_map(|list| {
            list.cards
                .iter()
                .enumerate()
                .map(move |(index, card)| CardRef { list, card, index })
        })
        .collect();

    find(
        "Card",
        &cards,
        reference,
        |c: &CardRef<'a>| c.card.id.as_str(),
        |c: &CardRef<'a>| c.card.title.as_str(),
    )
    .copied()
}
