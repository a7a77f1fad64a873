pub mod facets;
pub mod rows;

pub use facets::{click_facet, facet_step};
pub use rows::{
    Outcome, anchor_position, click_row, select_none, select_visible, selected_entries, step,
    visible_indices,
};
