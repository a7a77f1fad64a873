use std::sync::Arc;

use crate::filters::FacetMask;
use crate::models::Track;

/// Bookkeeping wrapper around one track of the list
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Position in the collection passed to `set_tracks`; stable identity of the entry
    pub original_index: usize,
    /// Position in the current sort order
    pub display_index: usize,
    pub filter_mask: FacetMask,
    pub selected: bool,
    pub track: Arc<Track>,
}

impl Entry {
    pub fn new(track: Arc<Track>, index: usize) -> Self {
        Self {
            original_index: index,
            display_index: index,
            filter_mask: FacetMask::NONE,
            selected: false,
            track,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.filter_mask.is_empty()
    }
}
