pub mod apply;
pub mod facet;
pub mod options;
pub mod query;

pub use apply::{FacetFilters, apply_facet, normalize_values, track_matches};
pub use facet::{Facet, FacetMask};
pub use options::{FacetOption, facet_options, option_position};
pub use query::{FacetQuery, parse_query};
