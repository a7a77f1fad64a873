//! Reducer of the track list.
//!
//! Every user gesture is an [`Action`]. [`TrackList::reduce`] maps a snapshot and an action to
//! the next snapshot plus at most one [`Effect`] for the collaborators (play, delete, skip).
//! The reducer never calls out itself, which keeps it synchronous and easy to test.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use super::state::TrackList;
use crate::filters::{Facet, apply_facet, normalize_values};
use crate::input::{Key, Modifiers};
use crate::models::{Entry, Track};
use crate::selection::{self, Outcome, click_facet, facet_step};
use crate::sort::{SortRequest, order::renumber, sort_entries};
use crate::typeahead::find_prefix;

/// Direction of a skip request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipDirection {
    Back,
    Forward,
}

impl SkipDirection {
    pub fn offset(self) -> i32 {
        match self {
            SkipDirection::Back => -1,
            SkipDirection::Forward => 1,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    /// Replace the whole collection
    SetTracks(Vec<Track>),
    /// Replace a facet's accepted values
    ApplyFacet { facet: Facet, values: Vec<String> },
    Sort(SortRequest),
    ClickRow { position: usize, modifiers: Modifiers },
    KeyPress { key: Key, modifiers: Modifiers },
    ClickFacet { facet: Facet, position: usize, modifiers: Modifiers },
    FacetKeyPress { facet: Facet, key: Key, modifiers: Modifiers, now: Instant },
    /// The pending delete succeeded
    DeleteResolved,
    /// The pending delete failed; nothing is removed
    DeleteFailed,
}

impl Action {
    pub fn search(query: impl Into<String>) -> Self {
        Action::ApplyFacet { facet: Facet::Search, values: vec![query.into()] }
    }
}

/// Request for an external collaborator
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Play { rows: Vec<Arc<Track>>, start: usize },
    Delete { entries: Vec<Entry> },
    Skip(SkipDirection),
}

/// Result of reducing one action
#[derive(Debug, Clone)]
pub struct Reduced {
    pub state: TrackList,
    /// Whether the action addressed anything
    pub handled: bool,
    pub effect: Option<Effect>,
}

impl Reduced {
    fn ignored(state: TrackList) -> Self {
        Self { state, handled: false, effect: None }
    }

    fn handled(state: TrackList) -> Self {
        Self { state, handled: true, effect: None }
    }

    fn effect(state: TrackList, effect: Effect) -> Self {
        Self { state, handled: true, effect: Some(effect) }
    }
}

impl TrackList {
    pub fn reduce(&self, action: Action) -> Reduced {
        let started = Instant::now();
        let label = action_label(&action);
        let reduced = self.reduce_inner(action);
        debug!(
            action = label,
            handled = reduced.handled,
            rederived = !Arc::ptr_eq(&self.view, &reduced.state.view),
            elapsed = ?started.elapsed(),
            "reduced action"
        );
        reduced
    }

    fn reduce_inner(&self, action: Action) -> Reduced {
        match action {
            Action::SetTracks(tracks) => self.set_tracks(tracks),
            Action::ApplyFacet { facet, values } => {
                let mut next = self.clone();
                next.apply_values(facet, normalize_values(values));
                Reduced::handled(next)
            }
            Action::Sort(request) => {
                let mut next = self.clone();
                let entries = Arc::make_mut(&mut next.entries);
                if sort_entries(entries, &mut next.sort, request) {
                    next.rederive();
                    Reduced::handled(next)
                } else {
                    Reduced::handled(self.clone())
                }
            }
            Action::ClickRow { position, modifiers } => {
                self.select_with(|entries, visible, anchor| {
                    selection::click_row(entries, visible, anchor, position, modifiers)
                })
            }
            Action::KeyPress { key, modifiers } => self.key_press(key, modifiers),
            Action::ClickFacet { facet, position, modifiers } => {
                let mut next = self.clone();
                if next.click_facet(facet, position, modifiers) {
                    Reduced::handled(next)
                } else {
                    Reduced::ignored(self.clone())
                }
            }
            Action::FacetKeyPress { facet, key, modifiers, now } => {
                self.facet_key_press(facet, key, modifiers, now)
            }
            Action::DeleteResolved => self.settle_delete(true),
            Action::DeleteFailed => self.settle_delete(false),
        }
    }

    fn set_tracks(&self, tracks: Vec<Track>) -> Reduced {
        let mut next = self.clone();
        if next.pending_delete.is_some() {
            debug!(count = tracks.len(), "delete pending, queueing track refresh");
            next.queued_tracks = Some(tracks);
            return Reduced::handled(next);
        }
        next.replace_tracks(tracks);
        next.rederive();
        Reduced::handled(next)
    }

    /// Install `values` for `facet`; a no-op when the set is unchanged
    fn apply_values(&mut self, facet: Facet, values: BTreeSet<String>) {
        if *self.filters.get(facet) == values {
            debug!(%facet, "facet values unchanged");
            return;
        }
        let entries = Arc::make_mut(&mut self.entries);
        apply_facet(entries, facet, &values);
        self.filters.set(facet, values);
        self.rederive();
    }

    /// Run a row-selection operation on a copy of the entries, keeping the old allocation
    /// unless a flag actually changed
    fn select_with<F>(&self, op: F) -> Reduced
    where
        F: FnOnce(&mut [Entry], &[usize], &mut Option<usize>) -> Outcome,
    {
        let mut next = self.clone();
        let mut entries = (*self.entries).clone();
        match op(&mut entries, self.view.visible(), &mut next.anchor) {
            Outcome::Ignored => Reduced::ignored(self.clone()),
            Outcome::Unchanged => Reduced::handled(next),
            // selection flags never feed the view
            Outcome::Changed => {
                next.entries = Arc::new(entries);
                Reduced::handled(next)
            }
        }
    }

    fn key_press(&self, key: Key, modifiers: Modifiers) -> Reduced {
        match key {
            k if modifiers.meta_or_ctrl && k.is_select_all() => {
                if modifiers.shift {
                    self.select_with(|entries, _, _| selection::select_none(entries))
                } else {
                    self.select_with(|entries, _, _| selection::select_visible(entries))
                }
            }
            Key::Enter => {
                let selected = self.selected();
                let rows = if selected.is_empty() {
                    self.display_tracks().to_vec()
                } else {
                    selected.iter().map(|e| Arc::clone(&e.track)).collect()
                };
                Reduced::effect(self.clone(), Effect::Play { rows, start: 0 })
            }
            Key::Delete | Key::Backspace => {
                if self.pending_delete.is_some() {
                    debug!("delete already pending");
                    return Reduced::ignored(self.clone());
                }
                let entries: Vec<Entry> = self.selected().into_iter().cloned().collect();
                if entries.is_empty() {
                    return Reduced::ignored(self.clone());
                }
                let mut next = self.clone();
                next.pending_delete = Some(entries.iter().map(|e| e.original_index).collect());
                Reduced::effect(next, Effect::Delete { entries })
            }
            Key::ArrowRight => Reduced::effect(self.clone(), Effect::Skip(SkipDirection::Forward)),
            Key::ArrowLeft => Reduced::effect(self.clone(), Effect::Skip(SkipDirection::Back)),
            Key::ArrowDown | Key::ArrowUp => {
                let forward = key == Key::ArrowDown;
                self.select_with(|entries, visible, anchor| {
                    selection::step(entries, visible, anchor, forward, modifiers.shift)
                })
            }
            _ => Reduced::ignored(self.clone()),
        }
    }

    /// Apply a facet option click; false if the position addresses nothing
    fn click_facet(&mut self, facet: Facet, position: usize, modifiers: Modifiers) -> bool {
        if facet == Facet::Search {
            return false;
        }
        let view = Arc::clone(&self.view);
        let values = click_facet(
            view.options(facet),
            self.filters.get(facet),
            &mut self.facet_anchors[facet.index()],
            position,
            modifiers,
        );
        match values {
            Some(values) => {
                self.apply_values(facet, values);
                true
            }
            None => false,
        }
    }

    fn facet_key_press(
        &self,
        facet: Facet,
        key: Key,
        modifiers: Modifiers,
        now: Instant,
    ) -> Reduced {
        if facet == Facet::Search {
            return Reduced::ignored(self.clone());
        }
        let mut next = self.clone();

        if modifiers.meta_or_ctrl && key.is_select_all() {
            next.typeahead[facet.index()].clear();
            next.click_facet(facet, 0, Modifiers::NONE);
            return Reduced::handled(next);
        }

        match key {
            Key::ArrowDown | Key::ArrowUp => {
                next.typeahead[facet.index()].clear();
                let anchor = self.facet_anchor(facet);
                match facet_step(self.facet_options(facet), anchor, key == Key::ArrowDown) {
                    Some(position) => {
                        let modifiers =
                            if modifiers.shift { Modifiers::SHIFT } else { Modifiers::NONE };
                        next.click_facet(facet, position, modifiers);
                        Reduced::handled(next)
                    }
                    None => Reduced::ignored(self.clone()),
                }
            }
            Key::Char(ch) if !modifiers.meta_or_ctrl && !ch.is_control() => {
                let timeout = next.config.typeahead_timeout;
                let prefix = next.typeahead[facet.index()].push(ch, now, timeout).to_string();
                match find_prefix(self.facet_options(facet), &prefix) {
                    Some(position) => {
                        debug!(%facet, %prefix, position, "typeahead match");
                        next.click_facet(facet, position, Modifiers::NONE);
                    }
                    None => debug!(%facet, %prefix, "typeahead miss"),
                }
                Reduced::handled(next)
            }
            _ => Reduced::ignored(self.clone()),
        }
    }

    fn settle_delete(&self, succeeded: bool) -> Reduced {
        let Some(deleted) = self.pending_delete.as_ref() else {
            return Reduced::ignored(self.clone());
        };
        let mut next = self.clone();
        next.pending_delete = None;

        if succeeded {
            let deleted: HashSet<usize> = deleted.iter().copied().collect();
            let entries = Arc::make_mut(&mut next.entries);
            entries.retain(|e| !deleted.contains(&e.original_index));
            renumber(entries);
            debug!(removed = deleted.len(), remaining = entries.len(), "delete resolved");
        }

        let queued = next.queued_tracks.take();
        if let Some(tracks) = queued {
            next.replace_tracks(tracks);
        } else if !succeeded {
            debug!("delete failed, keeping entries");
            return Reduced::handled(next);
        }
        next.rederive();
        Reduced::handled(next)
    }
}

fn action_label(action: &Action) -> &'static str {
    match action {
        Action::SetTracks(_) => "set_tracks",
        Action::ApplyFacet { .. } => "apply_facet",
        Action::Sort(_) => "sort",
        Action::ClickRow { .. } => "click_row",
        Action::KeyPress { .. } => "key_press",
        Action::ClickFacet { .. } => "click_facet",
        Action::FacetKeyPress { .. } => "facet_key_press",
        Action::DeleteResolved => "delete_resolved",
        Action::DeleteFailed => "delete_failed",
    }
}
