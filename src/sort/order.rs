use std::fmt;
use std::str::FromStr;

use anyhow::{Error, bail};
use rayon::prelude::*;

use super::natural::sort_value;
use crate::models::{Entry, TrackField};

/// Column the list is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Order in which tracks were supplied
    #[default]
    Original,
    Field(TrackField),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Requested sort: a key plus an optional explicit direction.
///
/// Without a direction, requesting the active key toggles the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortRequest {
    pub key: SortKey,
    pub direction: Option<Direction>,
}

/// Active ordering of the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub key: SortKey,
    pub reversed: bool,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Original => "original",
            SortKey::Field(field) => field.as_str(),
        }
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "original" | "origIndex" | "original_index" => Ok(SortKey::Original),
            other => Ok(SortKey::Field(other.parse()?)),
        }
    }
}

impl SortRequest {
    pub fn toggle(key: SortKey) -> Self {
        Self { key, direction: None }
    }

    pub fn ascending(key: SortKey) -> Self {
        Self { key, direction: Some(Direction::Ascending) }
    }

    pub fn descending(key: SortKey) -> Self {
        Self { key, direction: Some(Direction::Descending) }
    }
}

/// Parses `name`, `+name` (ascending) and `-name` (descending)
impl FromStr for SortRequest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            bail!("Empty sort key");
        }
        let (direction, rest) = match s.as_bytes()[0] {
            b'+' => (Some(Direction::Ascending), &s[1..]),
            b'-' => (Some(Direction::Descending), &s[1..]),
            _ => (None, s),
        };
        Ok(SortRequest { key: rest.parse()?, direction })
    }
}

impl SortState {
    pub fn direction(&self) -> Direction {
        if self.reversed { Direction::Descending } else { Direction::Ascending }
    }

    /// Request that reproduces this state from scratch
    pub fn as_request(&self) -> SortRequest {
        SortRequest { key: self.key, direction: Some(self.direction()) }
    }
}

impl fmt::Display for SortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.reversed { '-' } else { '+' };
        write!(f, "{}{}", sign, self.key.as_str())
    }
}

/// Reorder `entries` for `request`, returning false when the order is unchanged.
///
/// Switching keys runs a stable ascending sort (ties by original position); requesting the
/// active key reverses in place. Filter bits and selection flags travel with their entries.
pub fn sort_entries(entries: &mut [Entry], state: &mut SortState, request: SortRequest) -> bool {
    if request.key == state.key {
        if request.direction == Some(state.direction()) {
            return false;
        }
        entries.reverse();
        state.reversed = !state.reversed;
    } else {
        match request.key {
            SortKey::Original => entries.par_sort_by_key(|entry| entry.original_index),
            SortKey::Field(field) => entries.par_sort_by_cached_key(|entry| {
                (sort_value(&entry.track, field), entry.original_index)
            }),
        }
        state.key = request.key;
        state.reversed = false;
        if request.direction == Some(Direction::Descending) {
            entries.reverse();
            state.reversed = true;
        }
    }

    renumber(entries);
    true
}

/// Make `display_index` match each entry's position
pub fn renumber(entries: &mut [Entry]) {
    for (position, entry) in entries.iter_mut().enumerate() {
        entry.display_index = position;
    }
}
