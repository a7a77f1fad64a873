use std::collections::BTreeSet;

use crate::filters::{FacetOption, option_position};
use crate::input::Modifiers;

/// Compute a facet's new value set for a click on option `position`.
///
/// The "All" row clears the set. Otherwise ctrl/meta toggles the value, shift adds the range
/// from the facet anchor, and a plain click keeps only this value. Returns `None` when the
/// position is out of range.
pub fn click_facet(
    options: &[FacetOption],
    current: &BTreeSet<String>,
    anchor: &mut Option<String>,
    position: usize,
    modifiers: Modifiers,
) -> Option<BTreeSet<String>> {
    let option = options.get(position)?;
    let Some(value) = option.value.clone() else {
        *anchor = None;
        return Some(BTreeSet::new());
    };

    let mut values = current.clone();
    if modifiers.shift {
        let start = anchor
            .as_deref()
            .and_then(|a| option_position(options, Some(a)))
            .unwrap_or(position);
        let (low, high) = (start.min(position), start.max(position));
        values.extend(options[low..=high].iter().filter_map(|o| o.value.clone()));
    } else if modifiers.meta_or_ctrl {
        if !values.remove(&value) {
            values.insert(value.clone());
        }
    } else {
        values.clear();
        values.insert(value.clone());
    }

    *anchor = Some(value);
    Some(values)
}

/// Option position one step away from the facet anchor (`None` anchor is the "All" row)
pub fn facet_step(options: &[FacetOption], anchor: Option<&str>, forward: bool) -> Option<usize> {
    let current = option_position(options, anchor)?;
    let next = if forward { current.checked_add(1)? } else { current.checked_sub(1)? };
    (next < options.len()).then_some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(values: &[&str]) -> Vec<FacetOption> {
        let mut rows = vec![FacetOption {
            label: format!("All ({} Genres)", values.len()),
            value: None,
            selected: true,
        }];
        rows.extend(values.iter().map(|v| FacetOption {
            label: v.to_string(),
            value: Some(v.to_lowercase()),
            selected: false,
        }));
        rows
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_plain_click_replaces() {
        let rows = options(&["Blues", "Jazz", "Rock"]);
        let mut anchor = None;
        let values = click_facet(&rows, &set(&["blues"]), &mut anchor, 3, Modifiers::NONE);
        assert_eq!(values, Some(set(&["rock"])));
        assert_eq!(anchor.as_deref(), Some("rock"));
    }

    #[test]
    fn test_all_row_clears() {
        let rows = options(&["Blues", "Jazz"]);
        let mut anchor = Some("jazz".to_string());
        let values = click_facet(&rows, &set(&["jazz"]), &mut anchor, 0, Modifiers::SHIFT);
        assert_eq!(values, Some(BTreeSet::new()));
        assert_eq!(anchor, None);
    }

    #[test]
    fn test_meta_click_toggles() {
        let rows = options(&["Blues", "Jazz", "Rock"]);
        let mut anchor = None;
        let values = click_facet(&rows, &set(&["blues"]), &mut anchor, 2, Modifiers::META).unwrap();
        assert_eq!(values, set(&["blues", "jazz"]));
        let values = click_facet(&rows, &values, &mut anchor, 1, Modifiers::META).unwrap();
        assert_eq!(values, set(&["jazz"]));
    }

    #[test]
    fn test_shift_click_adds_range_from_anchor() {
        let rows = options(&["Blues", "Funk", "Jazz", "Rock"]);
        let mut anchor = Some("rock".to_string());
        let values = click_facet(&rows, &set(&["rock"]), &mut anchor, 2, Modifiers::SHIFT).unwrap();
        assert_eq!(values, set(&["funk", "jazz", "rock"]));
        assert_eq!(anchor.as_deref(), Some("funk"));
    }

    #[test]
    fn test_shift_click_extends_upward() {
        let rows = options(&["Blues", "Funk"]);
        let mut anchor = Some("funk".to_string());
        let values = click_facet(&rows, &set(&["funk"]), &mut anchor, 1, Modifiers::SHIFT).unwrap();
        assert_eq!(values, set(&["blues", "funk"]));
    }

    #[test]
    fn test_shift_click_without_anchor_adds_one() {
        let rows = options(&["Blues", "Funk", "Jazz"]);
        let mut anchor = None;
        let values = click_facet(&rows, &BTreeSet::new(), &mut anchor, 2, Modifiers::SHIFT).unwrap();
        assert_eq!(values, set(&["funk"]));
    }

    #[test]
    fn test_click_out_of_range() {
        let rows = options(&["Blues"]);
        let mut anchor = None;
        assert_eq!(click_facet(&rows, &BTreeSet::new(), &mut anchor, 5, Modifiers::NONE), None);
    }

    #[test]
    fn test_facet_step() {
        let rows = options(&["Blues", "Funk"]);
        assert_eq!(facet_step(&rows, None, true), Some(1));
        assert_eq!(facet_step(&rows, None, false), None);
        assert_eq!(facet_step(&rows, Some("funk"), true), None);
        assert_eq!(facet_step(&rows, Some("funk"), false), Some(1));
        assert_eq!(facet_step(&rows, Some("soul"), true), None);
    }
}
