//! HTTP surface: one search route per platform, a health check, and the
//! results-storage placeholder.

use crate::config::ServiceConfig;
use crate::error::{ApiError, Result};
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use lookalike_search::{MatchedAccount, Platform, SearchConfig, SearchRequest};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
struct AppState {
    search: Arc<SearchConfig>,
}

/// Body accepted by every `POST /{platform}/search` route.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchBody {
    #[serde(default)]
    keyword: String,
    limit: Option<usize>,
    throttle_ms: Option<u64>,
    fuzzy_threshold: Option<f64>,
}

impl SearchBody {
    fn into_request(self) -> SearchRequest {
        let mut request = SearchRequest::new(self.keyword.trim());
        if let Some(limit) = self.limit {
            request = request.with_limit(limit);
        }
        if let Some(ms) = self.throttle_ms {
            request = request.with_throttle(Duration::from_millis(ms));
        }
        if let Some(threshold) = self.fuzzy_threshold {
            request = request.with_threshold(threshold);
        }
        request
    }
}

#[derive(Debug, serde::Serialize)]
struct SearchResponse {
    keyword: String,
    count: usize,
    results: Vec<MatchedAccount>,
}

/// Build the application router around a search configuration.
pub fn router(search: SearchConfig) -> Router {
    let state = AppState {
        search: Arc::new(search),
    };

    Router::new()
        .route("/health", get(health))
        .route("/youtube/search", post(youtube_search))
        .route("/facebook/search", post(facebook_search))
        .route("/twitter/search", post(twitter_search))
        .route("/results", post(store_results))
        .with_state(state)
}

/// Bind the configured address and serve until the process exits.
pub async fn serve(config: ServiceConfig) -> anyhow::Result<()> {
    let search = config.search_config();
    search
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid search configuration: {e}"))?;
    tracing::info!(credentials = ?search.credentials, scraping = search.scraping_enabled, "search configured");

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    let local_addr = listener.local_addr()?;

    let app = router(search);

    tracing::info!("lookalike server listening on http://{local_addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok"
    }))
}

async fn youtube_search(
    State(state): State<AppState>,
    body: std::result::Result<Json<SearchBody>, JsonRejection>,
) -> Result<Json<SearchResponse>> {
    run_search(Platform::YouTube, &state, body).await
}

async fn facebook_search(
    State(state): State<AppState>,
    body: std::result::Result<Json<SearchBody>, JsonRejection>,
) -> Result<Json<SearchResponse>> {
    run_search(Platform::Facebook, &state, body).await
}

async fn twitter_search(
    State(state): State<AppState>,
    body: std::result::Result<Json<SearchBody>, JsonRejection>,
) -> Result<Json<SearchResponse>> {
    run_search(Platform::Twitter, &state, body).await
}

async fn run_search(
    platform: Platform,
    state: &AppState,
    body: std::result::Result<Json<SearchBody>, JsonRejection>,
) -> Result<Json<SearchResponse>> {
    let Json(body) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let request = body.into_request();

    let results = lookalike_search::search(platform, &request, &state.search).await?;

    Ok(Json(SearchResponse {
        keyword: request.keyword,
        count: results.len(),
        results,
    }))
}

async fn store_results() -> Result<Json<serde_json::Value>> {
    Err(ApiError::NotImplemented(
        "result storage is not implemented".to_owned(),
    ))
}
