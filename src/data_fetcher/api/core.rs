use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::Client;
use tracing::{debug, instrument};

use super::fetch_utils::{fetch, probe};
use super::http_client::create_http_client_with_timeout;
use super::urls::{build_all_leagues_url, build_league_seasons_url};
use crate::config::Config;
use crate::data_fetcher::cache::{QueryCache, QueryKey, QueryState};
use crate::data_fetcher::models::{League, LeaguesResponse, Season, SeasonsResponse};
use crate::error::AppError;

/// Fetches the full league list. A response without a `leagues` array is an
/// empty list.
#[instrument(skip(client))]
pub async fn fetch_all_leagues(client: &Client, api_domain: &str) -> Result<Vec<League>, AppError> {
    let url = build_all_leagues_url(api_domain);
    let response: LeaguesResponse = fetch(client, &url).await?;
    debug!("Fetched {} leagues", response.leagues.len());
    Ok(response.leagues)
}

/// Fetches every season (with badge URL) of one league. The service omits the
/// `seasons` array for leagues without data; that is an empty list.
#[instrument(skip(client))]
pub async fn fetch_league_seasons(
    client: &Client,
    api_domain: &str,
    league_id: &str,
) -> Result<Vec<Season>, AppError> {
    let url = build_league_seasons_url(api_domain, league_id)?;
    let response: SeasonsResponse = fetch(client, &url).await?;
    debug!(
        "Fetched {} seasons for league {}",
        response.seasons.len(),
        league_id
    );
    Ok(response.seasons)
}

/// Entry point for the presentation layer: one cached query per remote list.
///
/// Every list is loaded at most once per service lifetime; later calls are
/// served from memory.
#[derive(Clone)]
pub struct SportsDataService {
    client: Client,
    api_domain: String,
    leagues: QueryCache<Vec<League>>,
    seasons: QueryCache<Vec<Season>>,
}

impl SportsDataService {
    /// Builds a service with an HTTP client configured from `config`.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout())?;
        Ok(Self::with_client(client, config.api_domain.clone()))
    }

    pub fn with_client(client: Client, api_domain: impl Into<String>) -> Self {
        Self {
            client,
            api_domain: api_domain.into(),
            leagues: QueryCache::new("leagues"),
            seasons: QueryCache::new("league-seasons"),
        }
    }

    pub fn api_domain(&self) -> &str {
        &self.api_domain
    }

    /// Current state of the league list, starting the fetch on first use.
    pub fn leagues(&self) -> QueryState<Vec<League>> {
        self.leagues
            .query(QueryKey::AllLeagues, self.leagues_loader())
    }

    /// League list once the fetch has settled.
    pub async fn fetch_leagues(&self) -> QueryState<Vec<League>> {
        self.leagues
            .fetch(QueryKey::AllLeagues, self.leagues_loader())
            .await
    }

    /// Current state of one league's seasons, starting the fetch on first use.
    /// A blank id issues no request and reports `Idle`.
    pub fn league_seasons(&self, league_id: &str) -> QueryState<Vec<Season>> {
        let league_id = league_id.trim();
        if league_id.is_empty() {
            return QueryState::Idle;
        }
        self.seasons.query(
            QueryKey::LeagueSeasons(league_id.to_string()),
            self.seasons_loader(league_id),
        )
    }

    /// Seasons of one league once the fetch has settled.
    pub async fn fetch_league_seasons(&self, league_id: &str) -> QueryState<Vec<Season>> {
        let league_id = league_id.trim();
        if league_id.is_empty() {
            return QueryState::Idle;
        }
        self.seasons
            .fetch(
                QueryKey::LeagueSeasons(league_id.to_string()),
                self.seasons_loader(league_id),
            )
            .await
    }

    /// Checks whether a badge image URL answers successfully.
    pub async fn check_image(&self, url: &str) -> Result<(), AppError> {
        probe(&self.client, url).await
    }

    pub fn leagues_cache(&self) -> &QueryCache<Vec<League>> {
        &self.leagues
    }

    pub fn seasons_cache(&self) -> &QueryCache<Vec<Season>> {
        &self.seasons
    }

    /// Writes per-cache entry counts to the debug log
    pub fn log_cache_stats(&self) {
        let leagues = self.leagues.stats();
        let seasons = self.seasons.stats();
        debug!(
            "Cache status - Leagues: {} entries ({} ok, {} failed, {} pending), Seasons: {} entries ({} ok, {} failed, {} pending)",
            leagues.total(),
            leagues.success,
            leagues.error,
            leagues.pending,
            seasons.total(),
            seasons.success,
            seasons.error,
            seasons.pending
        );
    }

    // Clones happen only when the cache actually starts a load
    fn leagues_loader(
        &self,
    ) -> impl FnOnce() -> BoxFuture<'static, Result<Vec<League>, AppError>> + '_ {
        move || {
            let client = self.client.clone();
            let api_domain = self.api_domain.clone();
            async move { fetch_all_leagues(&client, &api_domain).await }.boxed()
        }
    }

    fn seasons_loader<'a>(
        &'a self,
        league_id: &'a str,
    ) -> impl FnOnce() -> BoxFuture<'static, Result<Vec<Season>, AppError>> + 'a {
        move || {
            let client = self.client.clone();
            let api_domain = self.api_domain.clone();
            let league_id = league_id.to_string();
            async move { fetch_league_seasons(&client, &api_domain, &league_id).await }.boxed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::api::http_client::create_test_http_client;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    fn create_test_service(mock_server: &MockServer) -> SportsDataService {
        SportsDataService::with_client(create_test_http_client(), mock_server.uri())
    }

    fn create_mock_leagues_body() -> serde_json::Value {
        json!({
            "leagues": [
                {"idLeague": "4328", "strLeague": "English Premier League", "strSport": "Soccer", "strLeagueAlternate": "Premier League, EPL"},
                {"idLeague": "4387", "strLeague": "NBA", "strSport": "Basketball", "strLeagueAlternate": "National Basketball Association"},
                {"idLeague": "4335", "strLeague": "Spanish La Liga", "strSport": "Soccer", "strLeagueAlternate": ""}
            ]
        })
    }

    #[tokio::test]
    async fn test_fetch_all_leagues_success() {
        let mock_server = MockServer::start().await;
        let client = create_test_http_client();

        Mock::given(method("GET"))
            .and(path("/all_leagues.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(create_mock_leagues_body()))
            .mount(&mock_server)
            .await;

        let leagues = fetch_all_leagues(&client, &mock_server.uri()).await.unwrap();

        assert_eq!(leagues.len(), 3);
        assert_eq!(leagues[0].name, "English Premier League");
        assert_eq!(leagues[2].alternate_name, None);
    }

    #[tokio::test]
    async fn test_fetch_league_seasons_uses_badge_query() {
        let mock_server = MockServer::start().await;
        let client = create_test_http_client();

        Mock::given(method("GET"))
            .and(path("/search_all_seasons.php"))
            .and(query_param("badge", "1"))
            .and(query_param("id", "4328"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "seasons": [
                    {"strSeason": "2023-2024", "strBadge": "https://img.test/2023.png"},
                    {"strSeason": "2024-2025"}
                ]
            })))
            .mount(&mock_server)
            .await;

        let seasons = fetch_league_seasons(&client, &mock_server.uri(), "4328")
            .await
            .unwrap();

        assert_eq!(seasons.len(), 2);
        assert_eq!(seasons[0].badge_url.as_deref(), Some("https://img.test/2023.png"));
        assert_eq!(seasons[1].badge_url, None);
    }

    #[tokio::test]
    async fn test_missing_leagues_array_is_empty_not_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/all_leagues.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&mock_server)
            .await;

        let service = create_test_service(&mock_server);
        let state = service.fetch_leagues().await;

        assert!(!state.is_error());
        assert!(!state.is_loading());
        assert_eq!(state.data().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn test_empty_body_is_empty_list() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search_all_seasons.php"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&mock_server)
            .await;

        let service = create_test_service(&mock_server);
        let state = service.fetch_league_seasons("1").await;

        assert_eq!(state.data().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn test_invalid_json_is_an_error() {
        let mock_server = MockServer::start().await;
        let client = create_test_http_client();

        Mock::given(method("GET"))
            .and(path("/all_leagues.php"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&mock_server)
            .await;

        let result = fetch_all_leagues(&client, &mock_server.uri()).await;

        assert!(matches!(result, Err(AppError::ApiMalformedJson { .. })));
    }

    #[tokio::test]
    async fn test_http_error_is_normalized_with_status_and_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/all_leagues.php"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let service = create_test_service(&mock_server);
        let state = service.fetch_leagues().await;

        assert!(state.is_error());
        let error = state.error().unwrap();
        assert_eq!(error.status, Some(404));
        assert_eq!(error.data.as_deref(), Some("not here"));

        // Errors are not retried
        let again = service.fetch_leagues().await;
        assert!(again.is_error());
    }

    #[tokio::test]
    async fn test_leagues_fetched_once_per_service() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/all_leagues.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(create_mock_leagues_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let service = create_test_service(&mock_server);
        let first = service.leagues();
        let (second, third) = tokio::join!(service.fetch_leagues(), service.fetch_leagues());

        assert!(first.is_loading());
        assert_eq!(second.data().map(Vec::len), Some(3));
        assert_eq!(third.data().map(Vec::len), Some(3));
        assert_eq!(service.leagues().data().map(Vec::len), Some(3));
        assert_eq!(service.leagues_cache().loads_started(), 1);
    }

    #[tokio::test]
    async fn test_seasons_cached_per_league_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search_all_seasons.php"))
            .and(query_param("id", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"seasons": [{"strSeason": "2020"}]})))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search_all_seasons.php"))
            .and(query_param("id", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let service = create_test_service(&mock_server);
        service.fetch_league_seasons("1").await;
        service.fetch_league_seasons("1").await;
        let other = service.fetch_league_seasons("2").await;

        assert_eq!(
            service
                .seasons_cache()
                .peek(&QueryKey::LeagueSeasons("1".to_string()))
                .and_then(|state| state.data().map(|s| s[0].label.clone())),
            Some("2020".to_string())
        );
        assert_eq!(other.data().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn test_repeated_polling_starts_one_load() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/all_leagues.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(create_mock_leagues_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let service = create_test_service(&mock_server);
        service.fetch_leagues().await;
        for _ in 0..200 {
            assert_eq!(service.leagues().data().map(Vec::len), Some(3));
        }

        assert_eq!(service.leagues_cache().loads_started(), 1);
        assert_eq!(service.leagues_cache().len(), 1);
    }

    #[tokio::test]
    async fn test_league_id_is_encoded_in_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search_all_seasons.php"))
            .and(query_param("badge", "1"))
            .and(query_param("id", "43&badge=0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"seasons": [{"strSeason": "2020"}]})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let service = create_test_service(&mock_server);
        let state = service.fetch_league_seasons("43&badge=0").await;

        assert_eq!(state.data().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_blank_league_id_is_idle() {
        let mock_server = MockServer::start().await;
        let service = create_test_service(&mock_server);

        let state = service.league_seasons("  ");

        assert!(matches!(state, QueryState::Idle));
        assert!(service.seasons_cache().is_empty());
    }

    #[tokio::test]
    async fn test_network_failure_is_error_state() {
        // Nothing listens on this port
        let service =
            SportsDataService::with_client(create_test_http_client(), "http://127.0.0.1:9");

        let state = service.fetch_leagues().await;

        assert!(state.is_error());
        assert_eq!(state.error().and_then(|e| e.status), None);
    }

    #[tokio::test]
    async fn test_check_image() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/badge.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89, 0x50, 0x4e, 0x47]))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/missing.png"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let service = create_test_service(&mock_server);

        assert!(
            service
                .check_image(&format!("{}/badge.png", mock_server.uri()))
                .await
                .is_ok()
        );
        assert!(
            service
                .check_image(&format!("{}/missing.png", mock_server.uri()))
                .await
                .is_err()
        );
    }
}
