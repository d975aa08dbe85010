use crate::data_fetcher::models::{League, Sport};

/// Returns true when `league` matches an already trimmed, lowercased search
/// term. An empty term matches every league.
pub fn matches_search(league: &League, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    league.name.to_lowercase().contains(term)
        || league.sport.to_lowercase().contains(term)
        || league
            .alternate_name
            .as_ref()
            .is_some_and(|alt| alt.to_lowercase().contains(term))
}

/// Filters leagues by search term and optional sport, preserving input order.
///
/// The search term is trimmed; a blank term matches everything. Otherwise a
/// league matches when its name, sport or alternate name contains the term,
/// ignoring case. When a sport is selected, only leagues whose `sport` equals
/// the facet id are kept. Both conditions must hold.
///
/// # Examples
///
/// ```rust
/// use league_lens::data_fetcher::models::{League, Sport};
/// use league_lens::data_fetcher::processors::filter_leagues;
///
/// let leagues = vec![
///     League::new("1", "English Premier League", "Soccer", Some("EPL")),
///     League::new("2", "NBA", "Basketball", None),
/// ];
///
/// let hits = filter_leagues(&leagues, "epl", None);
/// assert_eq!(hits.len(), 1);
///
/// let basketball = Sport::new("Basketball");
/// let hits = filter_leagues(&leagues, "  ", Some(&basketball));
/// assert_eq!(hits[0].name, "NBA");
/// ```
pub fn filter_leagues<'a>(
    leagues: &'a [League],
    search_term: &str,
    selected_sport: Option<&Sport>,
) -> Vec<&'a League> {
    let term = search_term.trim().to_lowercase();

    leagues
        .iter()
        .filter(|league| selected_sport.is_none_or(|sport| league.sport == sport.id))
        .filter(|league| matches_search(league, &term))
        .collect()
}

/// Human-readable result count shown above the league list.
pub fn results_label(count: usize) -> String {
    if count == 1 {
        "1 league found".to_string()
    } else {
        format!("{count} leagues found")
    }
}
