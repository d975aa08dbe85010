use super::common::{empty_string_as_none, lenient_list};
use serde::{Deserialize, Serialize};

/// A sports competition as listed by `all_leagues.php`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    #[serde(rename = "idLeague")]
    pub id: String,
    #[serde(rename = "strLeague")]
    pub name: String,
    #[serde(rename = "strSport")]
    pub sport: String,
    #[serde(
        rename = "strLeagueAlternate",
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub alternate_name: Option<String>,
}

impl League {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        sport: impl Into<String>,
        alternate_name: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sport: sport.into(),
            alternate_name: alternate_name.map(str::to_string),
        }
    }
}

/// A sport facet derived from the distinct `sport` values of a league list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sport {
    pub id: String,
    pub name: String,
}

impl Sport {
    pub fn new(sport: impl Into<String>) -> Self {
        let sport = sport.into();
        Self {
            id: sport.clone(),
            name: sport,
        }
    }
}

/// Envelope of `all_leagues.php`; a missing or null `leagues` field is an empty list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaguesResponse {
    #[serde(default, deserialize_with = "lenient_list")]
    pub leagues: Vec<League>,
}
