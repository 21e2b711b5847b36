//! YouTube Data API v3: official channel search.
//!
//! `search.list` (type=channel) finds channels; each hit is then enriched
//! with a `channels.list` call to pick up the `@handle` and the full,
//! untruncated description. Enrichment calls are spaced by the request's
//! throttle interval and a failed enrichment keeps the search hit as-is.

use serde::Deserialize;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::source::{throttle, CandidateSource};
use crate::types::{CandidateAccount, SearchRequest, SourceKind};

/// Canonical URL prefix for a channel ID.
pub(crate) const CHANNEL_URL_PREFIX: &str = "https://www.youtube.com/channel/";

/// YouTube Data API channel search.
pub struct YouTubeApiSource;

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    id: SearchItemId,
    #[serde(default)]
    snippet: SearchSnippet,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    channel_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchSnippet {
    channel_id: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChannelListResponse {
    #[serde(default)]
    items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
struct ChannelItem {
    snippet: ChannelSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelSnippet {
    custom_url: Option<String>,
    #[serde(default)]
    description: String,
}

/// A channel found by `search.list`, before enrichment.
#[derive(Debug, Clone, PartialEq)]
struct ChannelHit {
    channel_id: String,
    title: String,
    description: String,
}

impl CandidateSource for YouTubeApiSource {
    async fn fetch(
        &self,
        client: &reqwest::Client,
        request: &SearchRequest,
        config: &SearchConfig,
    ) -> Result<Vec<CandidateAccount>, SearchError> {
        let key = config.credential_for(SourceKind::YouTubeApi)?;
        tracing::trace!(keyword = request.trimmed_keyword(), "YouTube API search");

        let limit = request.upstream_limit().to_string();
        let search: SearchListResponse = http::fetch_json(
            client
                .get(config.endpoints.url(SourceKind::YouTubeApi, "search"))
                .query(&[
                    ("part", "snippet"),
                    ("type", "channel"),
                    ("q", request.trimmed_keyword()),
                    ("maxResults", limit.as_str()),
                    ("key", key),
                ]),
            SourceKind::YouTubeApi,
        )
        .await?;

        let hits = channel_hits(search);
        tracing::debug!(count = hits.len(), "YouTube API channels found");

        let mut candidates = Vec::with_capacity(hits.len());
        for hit in hits {
            throttle(request.throttle).await;
            let details = match fetch_channel(client, config, key, &hit.channel_id).await {
                Ok(details) => details,
                Err(err) => {
                    tracing::warn!(channel = %hit.channel_id, error = %err, "channel enrichment failed");
                    None
                }
            };
            candidates.push(into_candidate(hit, details));
        }
        Ok(candidates)
    }

    fn kind(&self) -> SourceKind {
        SourceKind::YouTubeApi
    }
}

async fn fetch_channel(
    client: &reqwest::Client,
    config: &SearchConfig,
    key: &str,
    channel_id: &str,
) -> Result<Option<ChannelSnippet>, SearchError> {
    let response: ChannelListResponse = http::fetch_json(
        client
            .get(config.endpoints.url(SourceKind::YouTubeApi, "channels"))
            .query(&[("part", "snippet"), ("id", channel_id), ("key", key)]),
        SourceKind::YouTubeApi,
    )
    .await?;
    Ok(response.items.into_iter().next().map(|item| item.snippet))
}

fn channel_hits(response: SearchListResponse) -> Vec<ChannelHit> {
    response
        .items
        .into_iter()
        .filter_map(|item| {
            let channel_id = item.id.channel_id.or(item.snippet.channel_id)?;
            let title = item.snippet.title.trim().to_string();
            if channel_id.is_empty() || title.is_empty() {
                return None;
            }
            Some(ChannelHit {
                channel_id,
                title,
                description: item.snippet.description,
            })
        })
        .collect()
}

fn into_candidate(hit: ChannelHit, details: Option<ChannelSnippet>) -> CandidateAccount {
    let url = format!("{CHANNEL_URL_PREFIX}{}", hit.channel_id);
    let mut candidate = CandidateAccount::new(hit.title, url, SourceKind::YouTubeApi);

    let (handle, full_description) = match details {
        Some(snippet) => (snippet.custom_url, snippet.description),
        None => (None, String::new()),
    };
    if let Some(handle) = handle {
        candidate = candidate.with_handle(handle);
    }
    let description = if full_description.trim().is_empty() {
        hit.description
    } else {
        full_description
    };
    candidate.with_description(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Credentials, Endpoints};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SEARCH_JSON: &str = r#"{
        "kind": "youtube#searchListResponse",
        "items": [
            {
                "id": {"kind": "youtube#channel", "channelId": "UCacme"},
                "snippet": {"channelId": "UCacme", "title": "Acme", "description": "Official Acme channel..."}
            },
            {
                "id": {"kind": "youtube#channel", "channelId": "UCfan"},
                "snippet": {"channelId": "UCfan", "title": "Acme Fans", "description": ""}
            },
            {
                "id": {"kind": "youtube#channel"},
                "snippet": {"title": "No id at all"}
            },
            {
                "id": {"kind": "youtube#channel", "channelId": "UCuntitled"}
            }
        ]
    }"#;

    fn config_for(server: &MockServer) -> SearchConfig {
        SearchConfig {
            credentials: Credentials {
                youtube_api_key: Some("test-key".into()),
                ..Default::default()
            },
            endpoints: Endpoints::all_at(&server.uri()),
            ..Default::default()
        }
    }

    fn request() -> SearchRequest {
        SearchRequest::new("acme").with_throttle(std::time::Duration::ZERO)
    }

    #[test]
    fn hits_without_channel_id_are_skipped() {
        let response: SearchListResponse = serde_json::from_str(SEARCH_JSON).expect("json");
        let hits = channel_hits(response);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].channel_id, "UCacme");
        assert_eq!(hits[1].title, "Acme Fans");
    }

    #[test]
    fn enrichment_adds_handle_and_full_description() {
        let hit = ChannelHit {
            channel_id: "UCacme".into(),
            title: "Acme".into(),
            description: "Official Acme channel...".into(),
        };
        let details = ChannelSnippet {
            custom_url: Some("@acme".into()),
            description: "Official Acme channel. Full text.".into(),
        };
        let candidate = into_candidate(hit, Some(details));
        assert_eq!(candidate.handle.as_deref(), Some("acme"));
        assert_eq!(
            candidate.description.as_deref(),
            Some("Official Acme channel. Full text.")
        );
        assert_eq!(candidate.url, "https://www.youtube.com/channel/UCacme");
    }

    #[test]
    fn missing_enrichment_keeps_search_snippet() {
        let hit = ChannelHit {
            channel_id: "UCacme".into(),
            title: "Acme".into(),
            description: "snippet text".into(),
        };
        let candidate = into_candidate(hit, None);
        assert!(candidate.handle.is_none());
        assert_eq!(candidate.description.as_deref(), Some("snippet text"));
    }

    #[tokio::test]
    async fn placeholder_key_fails_without_calling_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut config = config_for(&server);
        config.credentials.youtube_api_key = Some("YOUR_YOUTUBE_API_KEY".into());
        let err = YouTubeApiSource
            .fetch(&reqwest::Client::new(), &request(), &config)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::MissingCredential(SourceKind::YouTubeApi)));
    }

    #[tokio::test]
    async fn search_then_enrich_each_channel() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/search"))
            .and(query_param("q", "acme"))
            .and(query_param("type", "channel"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_JSON))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/channels"))
            .and(query_param("id", "UCacme"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{"snippet": {"customUrl": "@acme", "description": "Full"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        // Enrichment for the second channel fails; the hit is still returned.
        Mock::given(method("GET"))
            .and(path("/youtube/v3/channels"))
            .and(query_param("id", "UCfan"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let accounts = YouTubeApiSource
            .fetch(&reqwest::Client::new(), &request(), &config_for(&server))
            .await
            .expect("search succeeds");

        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].handle.as_deref(), Some("acme"));
        assert_eq!(accounts[0].description.as_deref(), Some("Full"));
        assert_eq!(accounts[1].name, "Acme Fans");
        assert!(accounts[1].handle.is_none());
    }

    #[tokio::test]
    async fn enrichment_calls_are_throttled() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_JSON))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/channels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"items": []})))
            .expect(2)
            .mount(&server)
            .await;

        let throttle = std::time::Duration::from_millis(150);
        let request = SearchRequest::new("acme").with_throttle(throttle);
        let started = std::time::Instant::now();
        let accounts = YouTubeApiSource
            .fetch(&reqwest::Client::new(), &request, &config_for(&server))
            .await
            .expect("search succeeds");

        assert_eq!(accounts.len(), 2);
        assert!(started.elapsed() >= throttle * 2);
    }

    #[tokio::test]
    async fn unreachable_api_error_hides_key_and_keyword() {
        let mut config = SearchConfig {
            credentials: Credentials {
                youtube_api_key: Some("SUPERSECRETKEY".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        // Nothing listens on port 1.
        config.endpoints.youtube_api = "http://127.0.0.1:1/youtube/v3".into();

        let err = YouTubeApiSource
            .fetch(&reqwest::Client::new(), &request(), &config)
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(!msg.contains("SUPERSECRETKEY"), "{msg}");
        assert!(!msg.contains("q=acme"), "{msg}");
    }

    #[tokio::test]
    async fn api_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/search"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = YouTubeApiSource
            .fetch(&reqwest::Client::new(), &request(), &config_for(&server))
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Api { status: 403, .. }));
    }
}
