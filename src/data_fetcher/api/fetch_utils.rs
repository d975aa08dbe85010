//! Generic HTTP fetching with error classification

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};

use crate::error::AppError;

/// Fetches `url` and decodes the JSON body into `T`.
///
/// - transport failures map to `NetworkTimeout` / `NetworkConnection` / `ApiFetch`
/// - non-2xx responses map to `ApiHttp`, carrying the raw body when readable
/// - an empty body decodes as `{}` so list envelopes come back empty
/// - no retries are attempted
#[instrument(skip(client))]
pub(super) async fn fetch<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, AppError> {
    info!("Fetching data from URL: {url}");

    let response = send(client, url).await?;
    let response = ensure_success(response, url).await?;

    let response_text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read response text from URL {}: {}", url, e);
            return Err(AppError::ApiFetch(e));
        }
    };

    debug!("Response length: {} bytes", response_text.len());
    let preview: String = response_text.chars().take(1024).collect();
    debug!("Response text (first 1024 chars): {preview}");

    let body = if response_text.trim().is_empty() {
        warn!("Empty response body from {url}, treating as an empty object");
        "{}"
    } else {
        response_text.as_str()
    };

    match serde_json::from_str::<T>(body) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            error!("Failed to parse API response: {} (URL: {})", e, url);
            error!(
                "Response text (first 200 chars): {}",
                &body.chars().take(200).collect::<String>()
            );

            if !body.trim_start().starts_with('{') && !body.trim_start().starts_with('[') {
                Err(AppError::api_malformed_json(
                    "Response is not valid JSON",
                    url,
                ))
            } else if e.is_syntax() || e.is_eof() {
                Err(AppError::api_malformed_json(e.to_string(), url))
            } else {
                Err(AppError::api_unexpected_structure(e.to_string(), url))
            }
        }
    }
}

/// Issues a GET for `url` and only checks that it answers with a success status.
/// Used to decide whether a badge image is reachable.
#[instrument(skip(client))]
pub(super) async fn probe(client: &Client, url: &str) -> Result<(), AppError> {
    let response = send(client, url).await?;
    ensure_success(response, url).await?;
    Ok(())
}

async fn send(client: &Client, url: &str) -> Result<Response, AppError> {
    client.get(url).send().await.map_err(|e| {
        error!("Request failed for URL {}: {}", url, e);
        if e.is_timeout() {
            AppError::network_timeout(url)
        } else if e.is_connect() {
            AppError::network_connection(url, e.to_string())
        } else {
            AppError::ApiFetch(e)
        }
    })
}

async fn ensure_success(response: Response, url: &str) -> Result<Response, AppError> {
    let status = response.status();
    debug!("Response status: {status}");

    if status.is_success() {
        return Ok(response);
    }

    let status_code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("Unknown error");
    error!("HTTP {} - {} (URL: {})", status_code, reason, url);

    let body = response.text().await.ok().filter(|text| !text.is_empty());
    Err(AppError::api_http(status_code, reason, body, url))
}
