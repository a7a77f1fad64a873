use std::collections::{BTreeSet, HashMap};

use super::facet::{Facet, FacetMask};
use crate::models::Entry;
use crate::sort::natural_key;

/// One row of a facet's option list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetOption {
    pub label: String,
    /// Lowercased filter value, `None` for the "All" row
    pub value: Option<String>,
    pub selected: bool,
}

impl FacetOption {
    pub fn is_all(&self) -> bool {
        self.value.is_none()
    }
}

/// Build the option list of `facet`.
///
/// Values come from entries that no *other* facet excludes, so a facet never narrows its own
/// list. Values are de-duplicated case-insensitively (the first label in display order wins),
/// naturally sorted, and preceded by an "All (N Plural)" row that clears the facet.
pub fn facet_options(entries: &[Entry], facet: Facet, active: &BTreeSet<String>) -> Vec<FacetOption> {
    let fields = facet.option_fields();
    if fields.is_empty() {
        return Vec::new();
    }

    let others = FacetMask::others(facet);
    let mut labels: HashMap<String, &str> = HashMap::new();
    for entry in entries.iter().filter(|e| (e.filter_mask & others).is_empty()) {
        for label in fields.iter().filter_map(|f| entry.track.text(*f)) {
            if label.trim().is_empty() {
                continue;
            }
            labels.entry(label.to_lowercase()).or_insert(label);
        }
    }

    let mut rows: Vec<(String, FacetOption)> = labels
        .into_iter()
        .map(|(value, label)| {
            let row = FacetOption {
                label: label.to_string(),
                selected: active.contains(&value),
                value: Some(value),
            };
            (natural_key(label), row)
        })
        .collect();
    rows.sort_by(|(a_key, a), (b_key, b)| a_key.cmp(b_key).then_with(|| a.value.cmp(&b.value)));

    let (singular, plural) = facet.nouns();
    let noun = if rows.len() == 1 { singular } else { plural };
    let mut options = Vec::with_capacity(rows.len() + 1);
    options.push(FacetOption {
        label: format!("All ({} {})", rows.len(), noun),
        value: None,
        selected: active.is_empty(),
    });
    options.extend(rows.into_iter().map(|(_, row)| row));
    options
}

/// Position of the option holding `value` (`None` finds the "All" row)
pub fn option_position(options: &[FacetOption], value: Option<&str>) -> Option<usize> {
    options.iter().position(|option| option.value.as_deref() == value)
}
