//! Typeahead for facet lists.
//!
//! Each facet accumulates typed characters into a buffer that is discarded once the user pauses
//! longer than the configured timeout. The clock is passed in by the caller, so the buffer is a
//! plain value with a deadline rather than a running timer.

use std::time::{Duration, Instant};

use crate::filters::FacetOption;

/// Idle time after which the typing buffer starts over
pub const DEFAULT_TYPEAHEAD_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Typeahead {
    buffer: String,
    deadline: Option<Instant>,
}

impl Typeahead {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Append a character typed at `now` and return the current prefix
    pub fn push(&mut self, ch: char, now: Instant, timeout: Duration) -> &str {
        if self.is_expired(now) {
            self.buffer.clear();
        }
        self.buffer.extend(ch.to_lowercase());
        self.deadline = Some(now + timeout);
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.deadline = None;
    }
}

/// Position of the first option (never the "All" row) whose value starts with `prefix`
pub fn find_prefix(options: &[FacetOption], prefix: &str) -> Option<usize> {
    if prefix.is_empty() {
        return None;
    }
    options.iter().position(|option| option.value.as_deref().is_some_and(|v| v.starts_with(prefix)))
}
