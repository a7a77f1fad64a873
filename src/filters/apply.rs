use std::collections::BTreeSet;

use rayon::prelude::*;

use super::facet::Facet;
use crate::models::{Entry, Track};

/// Active value set of every facet. An empty set means "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetFilters {
    sets: [BTreeSet<String>; 4],
}

impl FacetFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, facet: Facet) -> &BTreeSet<String> {
        &self.sets[facet.index()]
    }

    pub fn set(&mut self, facet: Facet, values: BTreeSet<String>) {
        self.sets[facet.index()] = values;
    }

    pub fn is_active(&self, facet: Facet) -> bool {
        !self.get(facet).is_empty()
    }
}

/// Lowercase the values and drop blank ones
pub fn normalize_values<I, S>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .filter(|v| !v.as_ref().trim().is_empty())
        .map(|v| v.as_ref().to_lowercase())
        .collect()
}

/// Whether `track` passes `facet` under the given (normalized) value set
///
/// Filter logic:
/// - Empty set: everything passes
/// - Search: every word of every phrase is a substring of some search column
/// - Other facets: some match column equals one of the values
pub fn track_matches(track: &Track, facet: Facet, values: &BTreeSet<String>) -> bool {
    if values.is_empty() {
        return true;
    }

    let columns = facet.match_fields().iter().filter_map(|field| track.text(*field));

    match facet {
        Facet::Search => {
            let lowered: Vec<String> = columns.map(str::to_lowercase).collect();
            values
                .iter()
                .flat_map(|phrase| phrase.split_whitespace())
                .all(|word| lowered.iter().any(|column| column.contains(word)))
        }
        _ => columns.map(str::to_lowercase).any(|column| values.contains(&column)),
    }
}

/// Recompute `facet`'s bit on every entry for `values`
pub fn apply_facet(entries: &mut [Entry], facet: Facet, values: &BTreeSet<String>) {
    entries.par_iter_mut().for_each(|entry| {
        let failed = !track_matches(&entry.track, facet, values);
        entry.filter_mask = entry.filter_mask.with(facet, failed);
    });
}
