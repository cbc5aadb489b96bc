//! Positional moves within an ordered sequence.

/// Remove the item at `from` and reinsert it at `to`.
///
/// `to` is a position in the sequence after removal and is clamped to its
/// end. Returns `false`, leaving `items` untouched, when `from` is out of range.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() {
        return false;
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
    true
}
