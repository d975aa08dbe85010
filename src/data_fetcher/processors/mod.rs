pub mod facets;
pub mod filter;

pub use facets::derive_sport_facets;
pub use filter::{filter_leagues, matches_search, results_label};
