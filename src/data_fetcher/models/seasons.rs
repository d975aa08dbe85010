use super::common::{empty_string_as_none, lenient_list};
use serde::{Deserialize, Serialize};

/// One season of a league, optionally with a badge image URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    #[serde(rename = "strSeason")]
    pub label: String,
    #[serde(
        rename = "strBadge",
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub badge_url: Option<String>,
}

impl Season {
    pub fn new(label: impl Into<String>, badge_url: Option<&str>) -> Self {
        Self {
            label: label.into(),
            badge_url: badge_url.map(str::to_string),
        }
    }
}

/// Envelope of `search_all_seasons.php`; the service omits `seasons` for
/// leagues without season data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeasonsResponse {
    #[serde(default, deserialize_with = "lenient_list")]
    pub seasons: Vec<Season>,
}
