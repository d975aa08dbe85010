//! URL building utilities for API endpoints

use crate::error::AppError;
use reqwest::Url;

/// Builds the URL listing every league known to the service.
///
/// # Example
/// ```
/// use league_lens::data_fetcher::api::build_all_leagues_url;
///
/// let url = build_all_leagues_url("https://api.example.com");
/// assert_eq!(url, "https://api.example.com/all_leagues.php");
/// ```
pub fn build_all_leagues_url(api_domain: &str) -> String {
    format!("{}/all_leagues.php", api_domain.trim_end_matches('/'))
}

/// Builds the URL listing all seasons of a league, including badge URLs.
/// The league id is form-encoded into the query string.
///
/// # Example
/// ```
/// use league_lens::data_fetcher::api::build_league_seasons_url;
///
/// let url = build_league_seasons_url("https://api.example.com", "4328").unwrap();
/// assert_eq!(url, "https://api.example.com/search_all_seasons.php?badge=1&id=4328");
/// ```
pub fn build_league_seasons_url(api_domain: &str, league_id: &str) -> Result<String, AppError> {
    let base = format!("{}/search_all_seasons.php", api_domain.trim_end_matches('/'));
    let mut url = Url::parse(&base)
        .map_err(|e| AppError::config_error(format!("Invalid API domain '{api_domain}': {e}")))?;
    url.query_pairs_mut()
        .append_pair("badge", "1")
        .append_pair("id", league_id.trim());
    Ok(url.to_string())
}
