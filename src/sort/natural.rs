//! Natural ordering for track columns.
//!
//! Text is compared on a normalized key rather than its raw form:
//!
//! 1. lowercase
//! 2. drop one leading article (`a `, `an `, `the `)
//! 3. drop leading non-alphanumeric characters
//! 4. collapse whitespace runs into a single space
//! 5. drop a leading article again (`"...The End"`)
//! 6. prefix every ASCII digit run with `~`
//!
//! `~` sorts after every letter, so titles starting with digits come after alphabetic ones, and
//! digit runs compare lexically (`"2112"` < `"3"`). This is an approximation of numeric order,
//! not a magnitude comparison.

use std::cmp::Ordering;

use crate::models::{FieldValue, Track, TrackField};

const ARTICLES: [&str; 3] = ["a ", "an ", "the "];
const DIGIT_SENTINEL: char = '~';

/// Comparable form of a column value. Missing values order first, then numbers, then text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Missing,
    Number(i64),
    Text(String),
}

fn strip_article(s: &str) -> &str {
    ARTICLES.iter().find_map(|article| s.strip_prefix(article)).unwrap_or(s)
}

/// Normalize a text value into its natural sort key
pub fn natural_key(value: &str) -> String {
    let lower = value.to_lowercase();
    let stripped = strip_article(&lower).trim_start_matches(|c: char| !c.is_alphanumeric());

    let mut collapsed = String::with_capacity(stripped.len());
    let mut in_space = false;
    for ch in stripped.chars() {
        if ch.is_whitespace() {
            if !in_space {
                collapsed.push(' ');
            }
            in_space = true;
        } else {
            collapsed.push(ch);
            in_space = false;
        }
    }

    let mut key = String::with_capacity(collapsed.len() + 4);
    let mut in_digits = false;
    for ch in strip_article(&collapsed).chars() {
        let is_digit = ch.is_ascii_digit();
        if is_digit && !in_digits {
            key.push(DIGIT_SENTINEL);
        }
        in_digits = is_digit;
        key.push(ch);
    }
    key
}

/// Sort value of one track column
pub fn sort_value(track: &Track, field: TrackField) -> SortValue {
    match track.field(field) {
        FieldValue::Missing => SortValue::Missing,
        FieldValue::Number(n) => SortValue::Number(n),
        FieldValue::Text(s) => SortValue::Text(natural_key(s)),
    }
}

/// Compare two text values in natural order
pub fn compare_natural(a: &str, b: &str) -> Ordering {
    natural_key(a).cmp(&natural_key(b))
}
