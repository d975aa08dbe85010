//! League Lens: browse sports leagues and their season badges from TheSportsDB
//!
//! The library holds the fetch cache, the filtering logic and the view state
//! used by the terminal front-end.
//!
//! # Examples
//!
//! ```rust,no_run
//! use league_lens::{AppError, Config, SportsDataService};
//! use league_lens::data_fetcher::processors::filter_leagues;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let service = SportsDataService::new(&config)?;
//!
//!     let state = service.fetch_leagues().await;
//!     if let Some(leagues) = state.data() {
//!         for league in filter_leagues(leagues, "premier", None) {
//!             println!("{} ({})", league.name, league.sport);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::api::SportsDataService;
pub use data_fetcher::cache::{CacheStats, FetchError, QueryCache, QueryKey, QueryState, QueryStatus};
pub use data_fetcher::models::{League, Season, Sport};
pub use error::AppError;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
