//! Application-wide constants and configuration values
//!
//! This module centralizes magic numbers, default endpoints and user-facing
//! strings so the fetch, view and rendering layers agree on them.

/// Default base address of TheSportsDB v1 JSON API (free tier key "3")
pub const DEFAULT_API_DOMAIN: &str = "https://www.thesportsdb.com/api/v1/json/3";

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of idle connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Quiet period applied to search input before the filter is recomputed
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Environment variable names that override config file values
pub mod env_vars {
    pub const API_DOMAIN: &str = "LEAGUE_LENS_API_DOMAIN";
    pub const LOG_FILE: &str = "LEAGUE_LENS_LOG_FILE";
    pub const HTTP_TIMEOUT: &str = "LEAGUE_LENS_HTTP_TIMEOUT";
}

/// Interactive UI timing
pub mod polling {
    /// How long a single terminal event poll blocks
    pub const EVENT_POLL_MS: u64 = 50;

    /// How often cache statistics are written to the debug log
    pub const CACHE_STATS_LOG_SECONDS: u64 = 30;
}

/// Texts shown by the presentation layer
pub mod strings {
    pub const APP_TITLE: &str = "League Lens";
    pub const APP_SUBTITLE: &str = "Explore sports leagues with filters and badges";
    pub const LOADING: &str = "Loading...";
    pub const GENERIC_ERROR: &str = "Something went wrong.";
    pub const NO_LEAGUES_FOUND: &str = "No leagues found matching your search.";
    pub const ALL_SPORTS: &str = "All Sports";
    pub const SEARCH_PLACEHOLDER: &str = "Search leagues...";
    pub const ERROR_LOADING_LEAGUE_BADGE: &str = "Error loading league badge.";
    pub const NO_SEASONS_FOUND: &str = "No seasons found.";
    pub const NO_BADGE_AVAILABLE: &str = "No badge available";
    pub const NO_IMAGE: &str = "No Image";
    pub const ALL_SEASONS_TITLE: &str = "All Seasons";
    pub const SEASON_BADGE_ALT_TEXT_PREFIX: &str = "Season";
}
