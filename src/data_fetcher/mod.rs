pub mod api;
pub mod cache;
pub mod models;
pub mod processors;

pub use api::{SportsDataService, fetch_all_leagues, fetch_league_seasons};
pub use cache::{FetchError, QueryKey, QueryState, QueryStatus};
pub use models::{League, Season, Sport};
pub use processors::{derive_sport_facets, filter_leagues, results_label};
