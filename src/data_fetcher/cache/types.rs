//! Cache keys, entry states and the normalized fetch error

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::error::AppError;

/// Identifies one cacheable remote fetch and its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// The full league list
    AllLeagues,
    /// All seasons (with badges) of one league id
    LeagueSeasons(String),
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::AllLeagues => write!(f, "all-leagues"),
            QueryKey::LeagueSeasons(id) => write!(f, "league-seasons:{id}"),
        }
    }
}

/// Failure description handed to the presentation layer. All transport,
/// HTTP and pipeline failures collapse into this one shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
    /// HTTP status, when the server answered
    pub status: Option<u16>,
    /// Raw response body, when one was received
    pub data: Option<String>,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            data: None,
        }
    }
}

impl From<&AppError> for FetchError {
    fn from(error: &AppError) -> Self {
        Self {
            message: error.to_string(),
            status: error.http_status(),
            data: error.response_body().map(str::to_string),
        }
    }
}

impl From<AppError> for FetchError {
    fn from(error: AppError) -> Self {
        FetchError::from(&error)
    }
}

/// Status discriminant of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// No request issued (e.g. a blank league id)
    Idle,
    Pending,
    Success,
    Error,
}

/// Latest known state of a cached query.
///
/// Transitions are monotonic: `Pending` becomes `Success` or `Error` exactly
/// once and never goes back.
#[derive(Debug)]
pub enum QueryState<T> {
    Idle,
    Pending,
    Success(Arc<T>),
    Error(FetchError),
}

impl<T> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        match self {
            QueryState::Idle => QueryState::Idle,
            QueryState::Pending => QueryState::Pending,
            QueryState::Success(data) => QueryState::Success(Arc::clone(data)),
            QueryState::Error(e) => QueryState::Error(e.clone()),
        }
    }
}

impl<T> QueryState<T> {
    pub fn status(&self) -> QueryStatus {
        match self {
            QueryState::Idle => QueryStatus::Idle,
            QueryState::Pending => QueryStatus::Pending,
            QueryState::Success(_) => QueryStatus::Success,
            QueryState::Error(_) => QueryStatus::Error,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Success(data) => Some(data.as_ref()),
            _ => None,
        }
    }

    /// Shared handle to the data, cheap to clone
    pub fn shared_data(&self) -> Option<Arc<T>> {
        match self {
            QueryState::Success(data) => Some(Arc::clone(data)),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            QueryState::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Pending)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, QueryState::Error(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, QueryState::Success(_))
    }

    /// True once the entry reached a terminal state
    pub fn is_settled(&self) -> bool {
        self.is_success() || self.is_error()
    }
}

/// Per-status entry counts of one query cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub pending: usize,
    pub success: usize,
    pub error: usize,
}

impl CacheStats {
    pub fn total(&self) -> usize {
        self.pending + self.success + self.error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_key_display() {
        assert_eq!(QueryKey::AllLeagues.to_string(), "all-leagues");
        assert_eq!(
            QueryKey::LeagueSeasons("4328".to_string()).to_string(),
            "league-seasons:4328"
        );
    }

    #[test]
    fn test_fetch_error_from_http_error() {
        let app_error = AppError::api_http(
            500,
            "Internal Server Error",
            Some("oops".to_string()),
            "https://x.test/all_leagues.php",
        );
        let fetch_error = FetchError::from(&app_error);

        assert_eq!(fetch_error.status, Some(500));
        assert_eq!(fetch_error.data.as_deref(), Some("oops"));
        assert!(fetch_error.message.contains("500"));
    }

    #[test]
    fn test_fetch_error_from_network_error() {
        let app_error = AppError::network_timeout("https://x.test/all_leagues.php");
        let fetch_error = FetchError::from(app_error);

        assert_eq!(fetch_error.status, None);
        assert_eq!(fetch_error.data, None);
        assert_eq!(
            fetch_error.to_string(),
            "Network timeout while fetching data from: https://x.test/all_leagues.php"
        );
    }

    #[test]
    fn test_query_state_accessors() {
        let pending: QueryState<Vec<u8>> = QueryState::Pending;
        assert!(pending.is_loading());
        assert!(!pending.is_settled());
        assert_eq!(pending.data(), None);

        let success = QueryState::Success(Arc::new(vec![1u8, 2]));
        assert_eq!(success.status(), QueryStatus::Success);
        assert_eq!(success.data(), Some(&vec![1u8, 2]));
        assert!(!success.is_loading());
        assert!(!success.is_error());

        let error: QueryState<Vec<u8>> = QueryState::Error(FetchError::new("boom"));
        assert!(error.is_error());
        assert_eq!(error.error().map(|e| e.message.as_str()), Some("boom"));

        let idle: QueryState<Vec<u8>> = QueryState::Idle;
        assert!(!idle.is_loading());
        assert!(!idle.is_settled());
    }
}
