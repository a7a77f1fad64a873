//! Track list state, its reducer and the driver that runs effects.
//!
//! [`TrackList`] is an immutable snapshot. [`TrackList::reduce`] turns it plus an [`Action`]
//! into the next snapshot and at most one [`Effect`]. [`TrackBrowser`] keeps the current
//! snapshot and forwards effects to a [`Collaborators`] implementation.

pub mod actions;
pub mod driver;
pub mod state;

pub use actions::{Action, Effect, Reduced, SkipDirection};
pub use driver::{Collaborators, Dispatch, PendingDelete, TrackBrowser};
pub use state::{BrowserConfig, TrackList, View};
