//! Row selection over the visible, ordered part of the list.
//!
//! Positions are indices into the visible sequence, not into the full entry list. The anchor
//! is an `original_index` so it survives re-sorting and refiltering.

use crate::input::Modifiers;
use crate::models::Entry;

/// Result of a selection operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Input did not address anything (out of range, no anchor)
    Ignored,
    /// Handled, but no entry flag changed
    Unchanged,
    /// At least one entry flag changed
    Changed,
}

impl From<bool> for Outcome {
    fn from(changed: bool) -> Self {
        if changed { Outcome::Changed } else { Outcome::Unchanged }
    }
}

/// Indices of visible entries, in display order
pub fn visible_indices(entries: &[Entry]) -> Vec<usize> {
    entries.iter().enumerate().filter(|(_, e)| e.is_visible()).map(|(i, _)| i).collect()
}

/// Visible position of the anchor entry, if it is visible
pub fn anchor_position(entries: &[Entry], visible: &[usize], anchor: Option<usize>) -> Option<usize> {
    let anchor = anchor?;
    visible.iter().position(|&i| entries[i].original_index == anchor)
}

/// Apply a click on the visible row at `position`.
///
/// - plain: make this row the sole selection
/// - ctrl/meta: toggle this row
/// - shift (wins over ctrl/meta): select the range from the anchor to this row
pub fn click_row(
    entries: &mut [Entry],
    visible: &[usize],
    anchor: &mut Option<usize>,
    position: usize,
    modifiers: Modifiers,
) -> Outcome {
    let Some(&target) = visible.get(position) else {
        return Outcome::Ignored;
    };

    let outcome = if modifiers.shift {
        let start = anchor_position(entries, visible, *anchor).unwrap_or(position);
        let (low, high) = (start.min(position), start.max(position));
        let mut changed = false;
        for &i in &visible[low..=high] {
            if !entries[i].selected {
                entries[i].selected = true;
                changed = true;
            }
        }
        changed.into()
    } else if modifiers.meta_or_ctrl {
        entries[target].selected = !entries[target].selected;
        Outcome::Changed
    } else {
        let sole = entries[target].selected && entries.iter().filter(|e| e.selected).count() == 1;
        if !sole {
            for entry in entries.iter_mut() {
                entry.selected = false;
            }
            entries[target].selected = true;
        }
        (!sole).into()
    };

    *anchor = Some(entries[target].original_index);
    outcome
}

/// Select every visible entry and deselect every hidden one
pub fn select_visible(entries: &mut [Entry]) -> Outcome {
    let mut changed = false;
    for entry in entries.iter_mut() {
        let selected = entry.is_visible();
        if entry.selected != selected {
            entry.selected = selected;
            changed = true;
        }
    }
    changed.into()
}

/// Deselect every entry, hidden ones included
pub fn select_none(entries: &mut [Entry]) -> Outcome {
    let mut changed = false;
    for entry in entries.iter_mut().filter(|e| e.selected) {
        entry.selected = false;
        changed = true;
    }
    changed.into()
}

/// Move (or with shift, extend) the selection one visible row away from the anchor
pub fn step(
    entries: &mut [Entry],
    visible: &[usize],
    anchor: &mut Option<usize>,
    forward: bool,
    shift: bool,
) -> Outcome {
    let Some(current) = anchor_position(entries, visible, *anchor) else {
        return Outcome::Ignored;
    };
    let next = if forward { current.checked_add(1) } else { current.checked_sub(1) };
    match next {
        Some(position) if position < visible.len() => {
            click_row(entries, visible, anchor, position, Modifiers { shift, meta_or_ctrl: false })
        }
        _ => Outcome::Ignored,
    }
}

/// Selected visible entries, in display order
pub fn selected_entries<'a>(entries: &'a [Entry], visible: &[usize]) -> Vec<&'a Entry> {
    visible.iter().map(|&i| &entries[i]).filter(|e| e.selected).collect()
}
