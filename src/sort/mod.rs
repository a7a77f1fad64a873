pub mod natural;
pub mod order;

pub use natural::{SortValue, compare_natural, natural_key, sort_value};
pub use order::{Direction, SortKey, SortRequest, SortState, sort_entries};
