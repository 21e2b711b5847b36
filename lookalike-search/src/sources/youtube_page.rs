//! youtube.com search results page: first scraping fallback for YouTube.
//!
//! The results page embeds its data as a `ytInitialData` JSON blob inside
//! a `<script>` tag. We locate the blob, parse it, and collect every
//! `channelRenderer` object it contains, converting each through a typed
//! schema before it becomes a candidate.

use serde::Deserialize;
use serde_json::Value;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::source::CandidateSource;
use crate::types::{CandidateAccount, SearchRequest, SourceKind};

use super::squash_whitespace;
use super::youtube_api::CHANNEL_URL_PREFIX;

/// Search filter restricting results to channels.
const CHANNELS_ONLY_FILTER: &str = "EgIQAg==";

/// Markers that precede the `ytInitialData` object in the page source.
const INITIAL_DATA_MARKERS: &[&str] = &[
    "var ytInitialData = ",
    "window[\"ytInitialData\"] = ",
    "ytInitialData = ",
];

/// youtube.com results page scraper.
pub struct YouTubePageSource;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelRenderer {
    channel_id: String,
    title: Option<Text>,
    description_snippet: Option<Text>,
    navigation_endpoint: Option<NavigationEndpoint>,
    subscriber_count_text: Option<Text>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Text {
    simple_text: Option<String>,
    #[serde(default)]
    runs: Vec<TextRun>,
}

impl Text {
    fn flatten(&self) -> String {
        match &self.simple_text {
            Some(text) => text.clone(),
            None => self.runs.iter().map(|r| r.text.as_str()).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TextRun {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NavigationEndpoint {
    browse_endpoint: Option<BrowseEndpoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrowseEndpoint {
    canonical_base_url: Option<String>,
}

impl CandidateSource for YouTubePageSource {
    async fn fetch(
        &self,
        client: &reqwest::Client,
        request: &SearchRequest,
        config: &SearchConfig,
    ) -> Result<Vec<CandidateAccount>, SearchError> {
        tracing::trace!(keyword = request.trimmed_keyword(), "YouTube results page search");

        let html = http::fetch_text(
            client
                .get(config.endpoints.url(SourceKind::YouTubeResultsPage, "results"))
                .query(&[
                    ("search_query", request.trimmed_keyword()),
                    ("sp", CHANNELS_ONLY_FILTER),
                ]),
            SourceKind::YouTubeResultsPage,
        )
        .await?;

        tracing::trace!(bytes = html.len(), "YouTube results page received");
        parse_results_page(&html, request.upstream_limit())
    }

    fn kind(&self) -> SourceKind {
        SourceKind::YouTubeResultsPage
    }
}

/// Parse a results page into candidates.
///
/// Extracted as a separate function for testability with mock HTML.
pub(crate) fn parse_results_page(
    html: &str,
    max_results: usize,
) -> Result<Vec<CandidateAccount>, SearchError> {
    let data = extract_initial_data(html)?;

    let mut renderers = Vec::new();
    collect_channel_renderers(&data, &mut renderers);

    let mut candidates = Vec::new();
    for raw in renderers {
        let renderer: ChannelRenderer = match serde_json::from_value(raw.clone()) {
            Ok(r) => r,
            Err(err) => {
                tracing::debug!(error = %err, "skipping malformed channelRenderer");
                continue;
            }
        };
        if let Some(candidate) = into_candidate(renderer) {
            candidates.push(candidate);
        }
        if candidates.len() >= max_results {
            break;
        }
    }

    tracing::debug!(count = candidates.len(), "YouTube results page parsed");
    Ok(candidates)
}

fn extract_initial_data(html: &str) -> Result<Value, SearchError> {
    let start = INITIAL_DATA_MARKERS
        .iter()
        .find_map(|marker| html.find(marker).map(|pos| pos + marker.len()))
        .ok_or_else(|| SearchError::Parse("ytInitialData not found in results page".into()))?;

    // The blob is followed by `;</script>`; the streaming deserializer stops
    // at the end of the first complete value so the tail can be ignored.
    serde_json::Deserializer::from_str(&html[start..])
        .into_iter::<Value>()
        .next()
        .ok_or_else(|| SearchError::Parse("ytInitialData is empty".into()))?
        .map_err(|e| SearchError::Parse(format!("ytInitialData is not valid JSON: {e}")))
}

fn collect_channel_renderers<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if key == "channelRenderer" {
                    out.push(child);
                } else {
                    collect_channel_renderers(child, out);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_channel_renderers(item, out);
            }
        }
        _ => {}
    }
}

fn into_candidate(renderer: ChannelRenderer) -> Option<CandidateAccount> {
    let name = squash_whitespace(&renderer.title?.flatten());
    if name.is_empty() || renderer.channel_id.is_empty() {
        return None;
    }

    let url = format!("{CHANNEL_URL_PREFIX}{}", renderer.channel_id);
    let mut candidate = CandidateAccount::new(name, url, SourceKind::YouTubeResultsPage);

    // Newer layouts carry the handle in subscriberCountText; older ones only
    // in the canonical base URL.
    let handle = renderer
        .navigation_endpoint
        .and_then(|n| n.browse_endpoint)
        .and_then(|b| b.canonical_base_url)
        .and_then(|path| path.strip_prefix("/@").map(str::to_string))
        .or_else(|| {
            renderer
                .subscriber_count_text
                .map(|t| t.flatten())
                .filter(|t| t.starts_with('@'))
        });
    if let Some(handle) = handle {
        candidate = candidate.with_handle(handle);
    }
    if let Some(description) = renderer.description_snippet {
        candidate = candidate.with_description(squash_whitespace(&description.flatten()));
    }
    Some(candidate)
}
