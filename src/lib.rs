//! Track Browser - selection and faceted filtering over a music library
//!
//! This library holds the state behind a track list view. It supports:
//!
//! - Faceted filtering by free-text search, genre, artist and album
//! - Natural, article-insensitive sorting on any track column
//! - Multi-row selection with shift/ctrl semantics and keyboard navigation
//! - Typeahead over facet option lists
//! - Loading libraries from JSON or JSON Lines files
//!
//! # Example
//!
//! ```
//! use track_browser::{Action, Facet, Track, TrackList};
//!
//! let tracks = vec![
//!     Track { persistent_id: "1".into(), genre: Some("Rock".into()), ..Default::default() },
//!     Track { persistent_id: "2".into(), genre: Some("Jazz".into()), ..Default::default() },
//! ];
//! let list = TrackList::new(tracks);
//! let rock = Action::ApplyFacet { facet: Facet::Genre, values: vec!["rock".into()] };
//! let list = list.reduce(rock).state;
//! assert_eq!(list.display_tracks().len(), 1);
//! ```

pub mod browser;
pub mod cli;
pub mod filters;
pub mod input;
pub mod models;
pub mod parsers;
pub mod selection;
pub mod sort;
pub mod typeahead;
pub mod utils;

// Re-export commonly used types
pub use browser::{
    Action, BrowserConfig, Collaborators, Dispatch, Effect, PendingDelete, SkipDirection,
    TrackBrowser, TrackList,
};
pub use filters::{Facet, FacetMask, FacetOption};
pub use input::{Key, KeyInput, Modifiers};
pub use models::{Entry, Track, TrackField};
pub use parsers::load_library;
pub use sort::{SortKey, SortRequest, SortState};
