//! Facebook Graph API: official page search.

use serde::Deserialize;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::source::CandidateSource;
use crate::types::{CandidateAccount, SearchRequest, SourceKind};

/// Canonical Facebook web root used for page URLs.
pub(crate) const FACEBOOK_WEB_ROOT: &str = "https://www.facebook.com";

/// Fields requested for every page.
const PAGE_FIELDS: &str = "id,name,username,about,link";

/// Graph API `pages/search`.
pub struct FacebookGraphSource;

#[derive(Debug, Deserialize)]
struct PageSearchResponse {
    #[serde(default)]
    data: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    username: Option<String>,
    about: Option<String>,
    link: Option<String>,
}

impl CandidateSource for FacebookGraphSource {
    async fn fetch(
        &self,
        client: &reqwest::Client,
        request: &SearchRequest,
        config: &SearchConfig,
    ) -> Result<Vec<CandidateAccount>, SearchError> {
        let token = config.credential_for(SourceKind::FacebookGraph)?;
        tracing::trace!(keyword = request.trimmed_keyword(), "Facebook Graph search");

        let limit = request.upstream_limit().to_string();
        let response: PageSearchResponse = http::fetch_json(
            client
                .get(config.endpoints.url(SourceKind::FacebookGraph, "pages/search"))
                .query(&[
                    ("q", request.trimmed_keyword()),
                    ("fields", PAGE_FIELDS),
                    ("limit", limit.as_str()),
                    ("access_token", token),
                ]),
            SourceKind::FacebookGraph,
        )
        .await?;

        let candidates: Vec<CandidateAccount> =
            response.data.into_iter().filter_map(into_candidate).collect();
        tracing::debug!(count = candidates.len(), "Facebook Graph pages found");
        Ok(candidates)
    }

    fn kind(&self) -> SourceKind {
        SourceKind::FacebookGraph
    }
}

fn into_candidate(page: Page) -> Option<CandidateAccount> {
    let name = page.name.trim();
    if name.is_empty() || page.id.is_empty() {
        return None;
    }

    let url = page
        .link
        .filter(|link| link.starts_with("http"))
        .unwrap_or_else(|| format!("{FACEBOOK_WEB_ROOT}/{}", page.id));

    let mut candidate = CandidateAccount::new(name, url, SourceKind::FacebookGraph);
    if let Some(username) = page.username {
        candidate = candidate.with_handle(username);
    }
    if let Some(about) = page.about {
        candidate = candidate.with_description(about);
    }
    Some(candidate)
}
