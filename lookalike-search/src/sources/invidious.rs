//! Invidious mirror: second scraping fallback for YouTube.
//!
//! Invidious instances proxy YouTube and expose a JSON search API that
//! keeps working when youtube.com serves consent walls or bot checks.

use serde::Deserialize;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::source::CandidateSource;
use crate::types::{CandidateAccount, SearchRequest, SourceKind};

use super::squash_whitespace;
use super::youtube_api::CHANNEL_URL_PREFIX;

/// Invidious channel search.
pub struct InvidiousSource;

/// One entry of `/api/v1/search`; videos and playlists share the array.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchEntry {
    #[serde(rename = "type")]
    entry_type: String,
    author: Option<String>,
    author_id: Option<String>,
    channel_handle: Option<String>,
    description: Option<String>,
}

impl CandidateSource for InvidiousSource {
    async fn fetch(
        &self,
        client: &reqwest::Client,
        request: &SearchRequest,
        config: &SearchConfig,
    ) -> Result<Vec<CandidateAccount>, SearchError> {
        tracing::trace!(keyword = request.trimmed_keyword(), "Invidious search");

        let entries: Vec<SearchEntry> = http::fetch_json(
            client
                .get(config.endpoints.url(SourceKind::Invidious, "api/v1/search"))
                .query(&[("q", request.trimmed_keyword()), ("type", "channel")]),
            SourceKind::Invidious,
        )
        .await?;

        let candidates: Vec<CandidateAccount> = entries
            .into_iter()
            .filter_map(into_candidate)
            .take(request.upstream_limit())
            .collect();
        tracing::debug!(count = candidates.len(), "Invidious channels parsed");
        Ok(candidates)
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Invidious
    }
}

fn into_candidate(entry: SearchEntry) -> Option<CandidateAccount> {
    if entry.entry_type != "channel" {
        return None;
    }
    let name = squash_whitespace(entry.author.as_deref()?);
    let channel_id = entry.author_id.filter(|id| !id.is_empty())?;
    if name.is_empty() {
        return None;
    }

    let url = format!("{CHANNEL_URL_PREFIX}{channel_id}");
    let mut candidate = CandidateAccount::new(name, url, SourceKind::Invidious);
    if let Some(handle) = entry.channel_handle {
        candidate = candidate.with_handle(handle);
    }
    if let Some(description) = entry.description {
        candidate = candidate.with_description(squash_whitespace(&description));
    }
    Some(candidate)
}
