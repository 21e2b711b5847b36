//! Nitter mirror: scraping fallback for Twitter/X.
//!
//! Nitter renders user search results as static HTML timeline items with
//! `.fullname`, `.username` and a bio block, no JavaScript required.

use scraper::{Html, Selector};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::source::CandidateSource;
use crate::types::{CandidateAccount, SearchRequest, SourceKind};

use super::squash_whitespace;
use super::twitter_api::profile_url;

/// Nitter user search scraper.
pub struct NitterSource;

impl CandidateSource for NitterSource {
    async fn fetch(
        &self,
        client: &reqwest::Client,
        request: &SearchRequest,
        config: &SearchConfig,
    ) -> Result<Vec<CandidateAccount>, SearchError> {
        tracing::trace!(keyword = request.trimmed_keyword(), "Nitter user search");

        let html = http::fetch_text(
            client
                .get(config.endpoints.url(SourceKind::Nitter, "search"))
                .query(&[("f", "users"), ("q", request.trimmed_keyword())]),
            SourceKind::Nitter,
        )
        .await?;

        tracing::trace!(bytes = html.len(), "Nitter response received");
        parse_user_search(&html, request.upstream_limit())
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Nitter
    }
}

/// Parse a Nitter user search page into candidates.
///
/// Extracted as a separate function for testability with mock HTML.
pub(crate) fn parse_user_search(
    html: &str,
    max_results: usize,
) -> Result<Vec<CandidateAccount>, SearchError> {
    let document = Html::parse_document(html);

    let item_sel = Selector::parse(".timeline-item")
        .map_err(|e| SearchError::Parse(format!("invalid item selector: {e:?}")))?;
    let fullname_sel = Selector::parse(".fullname")
        .map_err(|e| SearchError::Parse(format!("invalid fullname selector: {e:?}")))?;
    let username_sel = Selector::parse(".username")
        .map_err(|e| SearchError::Parse(format!("invalid username selector: {e:?}")))?;
    let bio_sel = Selector::parse(".tweet-content, .bio")
        .map_err(|e| SearchError::Parse(format!("invalid bio selector: {e:?}")))?;

    let mut candidates = Vec::new();

    for item in document.select(&item_sel) {
        let handle = match item.select(&username_sel).next() {
            Some(el) => squash_whitespace(&el.text().collect::<String>()),
            None => continue,
        };
        let handle = handle.trim_start_matches('@').to_string();
        if handle.is_empty() {
            continue;
        }

        let name = item
            .select(&fullname_sel)
            .next()
            .map(|el| squash_whitespace(&el.text().collect::<String>()))
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| handle.clone());

        let bio = item
            .select(&bio_sel)
            .next()
            .map(|el| squash_whitespace(&el.text().collect::<Vec<_>>().join(" ")))
            .unwrap_or_default();

        candidates.push(
            CandidateAccount::new(name, profile_url(&handle), SourceKind::Nitter)
                .with_handle(&handle)
                .with_description(bio),
        );

        if candidates.len() >= max_results {
            break;
        }
    }

    tracing::debug!(count = candidates.len(), "Nitter users parsed");
    Ok(candidates)
}
