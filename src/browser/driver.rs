use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use futures::future::BoxFuture;
use tracing::{debug, warn};

use super::actions::{Action, Effect, SkipDirection};
use super::state::{BrowserConfig, TrackList};
use crate::filters::Facet;
use crate::input::{Key, KeyInput, Modifiers};
use crate::models::{Entry, Track};
use crate::sort::SortRequest;

/// Outside world the browser asks to play, delete and skip
pub trait Collaborators {
    fn play(&mut self, rows: Vec<Arc<Track>>, start: usize);

    /// Delete the given entries from the library; resolves once the library has settled
    fn delete(&mut self, entries: Vec<Entry>) -> BoxFuture<'static, Result<()>>;

    fn skip(&mut self, direction: SkipDirection);
}

/// Delete handed to the collaborator and awaiting completion
#[must_use = "a pending delete must be passed to `complete_delete`"]
pub struct PendingDelete {
    count: usize,
    future: BoxFuture<'static, Result<()>>,
}

impl PendingDelete {
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl std::fmt::Debug for PendingDelete {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingDelete").field("count", &self.count).finish_non_exhaustive()
    }
}

/// Result of dispatching one action
#[derive(Debug)]
#[must_use]
pub enum Dispatch {
    /// Nothing addressed by the action
    Ignored,
    Handled,
    DeletePending(PendingDelete),
}

impl Dispatch {
    pub fn is_handled(&self) -> bool {
        !matches!(self, Dispatch::Ignored)
    }
}

/// Holds the current [`TrackList`] snapshot and runs effects against the collaborators
pub struct TrackBrowser<C: Collaborators> {
    state: TrackList,
    collaborators: C,
}

impl<C: Collaborators> TrackBrowser<C> {
    pub fn new(collaborators: C) -> Self {
        Self::with_config(collaborators, BrowserConfig::default())
    }

    pub fn with_config(collaborators: C, config: BrowserConfig) -> Self {
        Self { state: TrackList::with_config(Vec::new(), config), collaborators }
    }

    pub fn state(&self) -> &TrackList {
        &self.state
    }

    pub fn collaborators(&self) -> &C {
        &self.collaborators
    }

    pub fn collaborators_mut(&mut self) -> &mut C {
        &mut self.collaborators
    }

    pub fn dispatch(&mut self, action: Action) -> Dispatch {
        let reduced = self.state.reduce(action);
        self.state = reduced.state;

        match reduced.effect {
            None if reduced.handled => Dispatch::Handled,
            None => Dispatch::Ignored,
            Some(Effect::Play { rows, start }) => {
                debug!(rows = rows.len(), start, "play");
                self.collaborators.play(rows, start);
                Dispatch::Handled
            }
            Some(Effect::Skip(direction)) => {
                debug!(?direction, "skip");
                self.collaborators.skip(direction);
                Dispatch::Handled
            }
            Some(Effect::Delete { entries }) => {
                let count = entries.len();
                debug!(count, "delete requested");
                let future = self.collaborators.delete(entries);
                Dispatch::DeletePending(PendingDelete { count, future })
            }
        }
    }

    /// Await a delete and settle the list; entries are removed only on success
    pub async fn complete_delete(&mut self, pending: PendingDelete) -> Result<()> {
        let PendingDelete { count, future } = pending;
        match future.await {
            Ok(()) => {
                let _ = self.dispatch(Action::DeleteResolved);
                Ok(())
            }
            Err(err) => {
                warn!(count, error = %err, "delete failed");
                let _ = self.dispatch(Action::DeleteFailed);
                Err(err).with_context(|| format!("Failed to delete {count} tracks"))
            }
        }
    }

    pub fn set_tracks(&mut self, tracks: Vec<Track>) -> Dispatch {
        self.dispatch(Action::SetTracks(tracks))
    }

    pub fn apply_facet(&mut self, facet: Facet, values: Vec<String>) -> Dispatch {
        self.dispatch(Action::ApplyFacet { facet, values })
    }

    pub fn search(&mut self, query: &str) -> Dispatch {
        self.dispatch(Action::search(query))
    }

    pub fn sort(&mut self, request: SortRequest) -> Dispatch {
        self.dispatch(Action::Sort(request))
    }

    pub fn click_row(&mut self, position: usize, modifiers: Modifiers) -> Dispatch {
        self.dispatch(Action::ClickRow { position, modifiers })
    }

    pub fn key_press(&mut self, input: KeyInput) -> Dispatch {
        self.dispatch(Action::KeyPress { key: input.key, modifiers: input.modifiers })
    }

    pub fn click_facet(&mut self, facet: Facet, position: usize, modifiers: Modifiers) -> Dispatch {
        self.dispatch(Action::ClickFacet { facet, position, modifiers })
    }

    pub fn facet_key_press(&mut self, facet: Facet, input: KeyInput, now: Instant) -> Dispatch {
        self.dispatch(Action::FacetKeyPress {
            facet,
            key: input.key,
            modifiers: input.modifiers,
            now,
        })
    }

    /// Press `key` without modifiers
    pub fn press(&mut self, key: Key) -> Dispatch {
        self.key_press(KeyInput::new(key, Modifiers::NONE))
    }
}
