use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::filters::{Facet, FacetFilters, FacetOption, apply_facet, facet_options};
use crate::models::{Entry, Track};
use crate::selection::{selected_entries, visible_indices};
use crate::sort::{SortState, sort_entries};
use crate::typeahead::{DEFAULT_TYPEAHEAD_TIMEOUT, Typeahead};

/// Tunables of a track list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserConfig {
    pub typeahead_timeout: Duration,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self { typeahead_timeout: DEFAULT_TYPEAHEAD_TIMEOUT }
    }
}

/// Derived, read-only view of a [`TrackList`]; selection changes share the previous one
#[derive(Debug, Default, PartialEq)]
pub struct View {
    visible: Vec<usize>,
    display_tracks: Vec<Arc<Track>>,
    options: [Vec<FacetOption>; 4],
}

impl View {
    fn derive(entries: &[Entry], filters: &FacetFilters) -> Self {
        let visible = visible_indices(entries);
        let display_tracks = visible.iter().map(|&i| Arc::clone(&entries[i].track)).collect();
        let mut options: [Vec<FacetOption>; 4] = Default::default();
        for facet in Facet::LISTED {
            options[facet.index()] = facet_options(entries, facet, filters.get(facet));
        }
        Self { visible, display_tracks, options }
    }

    /// Visible tracks in display order
    pub fn display_tracks(&self) -> &[Arc<Track>] {
        &self.display_tracks
    }

    /// Entry indices of the visible rows
    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    pub fn options(&self, facet: Facet) -> &[FacetOption] {
        &self.options[facet.index()]
    }
}

/// Immutable snapshot of the track list.
///
/// Entries and the derived [`View`] are shared behind `Arc`; reducing an action copies them
/// only when they change, so an action that changes nothing leaves `view()` pointing at the
/// same allocation.
#[derive(Debug, Clone)]
pub struct TrackList {
    pub(crate) entries: Arc<Vec<Entry>>,
    pub(crate) view: Arc<View>,
    pub(crate) filters: FacetFilters,
    pub(crate) sort: SortState,
    pub(crate) anchor: Option<usize>,
    pub(crate) facet_anchors: [Option<String>; 4],
    pub(crate) typeahead: [Typeahead; 4],
    /// Original indices handed to the delete collaborator and not yet settled
    pub(crate) pending_delete: Option<Vec<usize>>,
    /// Replacement collection received while a delete was pending
    pub(crate) queued_tracks: Option<Vec<Track>>,
    pub(crate) config: BrowserConfig,
}

impl Default for TrackList {
    fn default() -> Self {
        Self::with_config(Vec::new(), BrowserConfig::default())
    }
}

impl TrackList {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self::with_config(tracks, BrowserConfig::default())
    }

    pub fn with_config(tracks: Vec<Track>, config: BrowserConfig) -> Self {
        let mut list = Self {
            entries: Arc::new(Vec::new()),
            view: Arc::new(View::default()),
            filters: FacetFilters::new(),
            sort: SortState::default(),
            anchor: None,
            facet_anchors: Default::default(),
            typeahead: Default::default(),
            pending_delete: None,
            queued_tracks: None,
            config,
        };
        list.replace_tracks(tracks);
        list.rederive();
        list
    }

    /// Swap in a new collection, keeping the active sort and facet values
    pub(crate) fn replace_tracks(&mut self, tracks: Vec<Track>) {
        let mut entries: Vec<Entry> =
            tracks.into_iter().enumerate().map(|(i, t)| Entry::new(Arc::new(t), i)).collect();

        let previous = self.sort;
        self.sort = SortState::default();
        sort_entries(&mut entries, &mut self.sort, previous.as_request());

        for facet in Facet::ALL {
            let values = self.filters.get(facet);
            if !values.is_empty() {
                apply_facet(&mut entries, facet, values);
            }
        }

        debug!(count = entries.len(), sort = %self.sort, "replaced tracks");
        self.entries = Arc::new(entries);
        self.anchor = None;
    }

    /// Rebuild the derived view from the current entries and filters
    pub(crate) fn rederive(&mut self) {
        self.view = Arc::new(View::derive(&self.entries, &self.filters));
    }

    /// All entries in display order, hidden ones included
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn view(&self) -> &Arc<View> {
        &self.view
    }

    pub fn display_tracks(&self) -> &[Arc<Track>] {
        self.view.display_tracks()
    }

    /// Visible entries in display order
    pub fn visible_entries(&self) -> impl Iterator<Item = &Entry> {
        self.view.visible().iter().map(|&i| &self.entries[i])
    }

    /// Selected visible entries in display order
    pub fn selected(&self) -> Vec<&Entry> {
        selected_entries(&self.entries, self.view.visible())
    }

    pub fn facet_options(&self, facet: Facet) -> &[FacetOption] {
        self.view.options(facet)
    }

    pub fn filters(&self) -> &FacetFilters {
        &self.filters
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    /// Original index of the last clicked row
    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    pub fn facet_anchor(&self, facet: Facet) -> Option<&str> {
        self.facet_anchors[facet.index()].as_deref()
    }

    pub fn typeahead(&self, facet: Facet) -> &Typeahead {
        &self.typeahead[facet.index()]
    }

    pub fn is_delete_pending(&self) -> bool {
        self.pending_delete.is_some()
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }
}
