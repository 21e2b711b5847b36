//! Shared HTTP client with User-Agent rotation for upstream requests.
//!
//! Provides a configured [`reqwest::Client`] with browser-like headers,
//! cookie support, and rotating User-Agent strings, plus helpers that turn
//! transport failures and non-success statuses into [`SearchError`]s.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::SourceKind;
use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Realistic browser User-Agent strings, one picked per client.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// Build a [`reqwest::Client`] for one search.
///
/// The client has:
/// - Cookie store enabled (consent interstitials set cookies)
/// - Timeout from config
/// - Random User-Agent from built-in rotation list (or custom if configured)
/// - Browser-like `Accept` and `Accept-Language` defaults
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => random_user_agent().to_owned(),
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/json;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

    reqwest::Client::builder()
        .cookie_store(true)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // SAFETY: USER_AGENTS is a non-empty const array, choose only returns None on empty slices
        .unwrap_or(USER_AGENTS[0])
}

/// Send `request` and return the body of a successful response as text.
///
/// Error messages never include the request URL, which carries the
/// keyword and, for some APIs, the credential.
///
/// # Errors
///
/// [`SearchError::Http`] on transport failure, [`SearchError::Api`] on a
/// non-success status.
pub async fn fetch_text(
    request: reqwest::RequestBuilder,
    kind: SourceKind,
) -> Result<String, SearchError> {
    let response = send(request, kind).await?;
    response
        .text()
        .await
        .map_err(|e| SearchError::Http(format!("{kind} response read failed: {}", e.without_url())))
}

/// Send `request` and decode a successful response body as `T`.
///
/// # Errors
///
/// As [`fetch_text`], plus [`SearchError::Parse`] when the body does not
/// match the expected schema.
pub async fn fetch_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    kind: SourceKind,
) -> Result<T, SearchError> {
    let body = fetch_text(request, kind).await?;
    serde_json::from_str(&body)
        .map_err(|e| SearchError::Parse(format!("{kind} returned unexpected JSON: {e}")))
}

async fn send(
    request: reqwest::RequestBuilder,
    kind: SourceKind,
) -> Result<reqwest::Response, SearchError> {
    let response = request
        .send()
        .await
        .map_err(|e| SearchError::Http(format!("{kind} request failed: {}", e.without_url())))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SearchError::Api {
            kind,
            status: status.as_u16(),
        });
    }
    tracing::trace!(source = %kind, status = status.as_u16(), "upstream responded");
    Ok(response)
}
