//! HTTP client creation and configuration utilities

use reqwest::Client;
use std::time::Duration;

/// Creates an HTTP client with a request timeout and connection pooling.
///
/// No retry logic is layered on top: a failed request is reported as-is.
pub fn create_http_client_with_timeout(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(crate::constants::HTTP_POOL_MAX_IDLE_PER_HOST)
        .user_agent(concat!("league_lens/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Creates an HTTP client for testing with default timeout
#[cfg(test)]
pub fn create_test_http_client() -> Client {
    create_http_client_with_timeout(Duration::from_secs(
        crate::constants::DEFAULT_HTTP_TIMEOUT_SECONDS,
    ))
    .expect("Failed to create test HTTP client")
}
