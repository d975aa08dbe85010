use crate::data_fetcher::models::{League, Sport};
use std::collections::HashSet;

/// Derives one sport facet per distinct `sport` value, in the order each sport
/// first appears in `leagues`.
///
/// # Examples
///
/// ```rust
/// use league_lens::data_fetcher::models::League;
/// use league_lens::data_fetcher::processors::derive_sport_facets;
///
/// let leagues = vec![
///     League::new("1", "English Premier League", "Soccer", None),
///     League::new("2", "NBA", "Basketball", None),
///     League::new("3", "Spanish La Liga", "Soccer", None),
/// ];
///
/// let sports = derive_sport_facets(&leagues);
/// let names: Vec<&str> = sports.iter().map(|s| s.name.as_str()).collect();
/// assert_eq!(names, ["Soccer", "Basketball"]);
/// ```
pub fn derive_sport_facets(leagues: &[League]) -> Vec<Sport> {
    let mut seen = HashSet::new();
    leagues
        .iter()
        .filter(|league| seen.insert(league.sport.as_str()))
        .map(|league| Sport::new(&league.sport))
        .collect()
}
