//! Data models for the track list.
//!
//! - [`Track`] - Caller-supplied library record, read-only to the engine
//! - [`TrackField`] - Named track column used for sorting and facet matching
//! - [`Entry`] - Engine-private wrapper carrying order, filter and selection state
//!
//! Tracks deserialize with serde; every column except `persistent_id` may be absent.

pub mod entry;
pub mod track;

pub use entry::Entry;
pub use track::{FieldValue, Track, TrackField};
