//! mbasic.facebook.com page search: scraping fallback for Facebook.
//!
//! The basic mobile site renders search results as plain HTML without
//! JavaScript. Each result row holds a profile link (the page name) and
//! a few lines of category / about text.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::source::CandidateSource;
use crate::types::{CandidateAccount, SearchRequest, SourceKind};

use super::facebook_graph::FACEBOOK_WEB_ROOT;
use super::squash_whitespace;

/// Path segments that are site navigation rather than pages.
const RESERVED_PATHS: &[&str] = &[
    "search", "home.php", "login", "login.php", "help", "settings", "messages", "notifications",
    "friends", "groups", "events", "pages", "marketplace", "watch", "privacy", "policies",
];

/// mbasic.facebook.com page search scraper.
pub struct FacebookPageSource;

impl CandidateSource for FacebookPageSource {
    async fn fetch(
        &self,
        client: &reqwest::Client,
        request: &SearchRequest,
        config: &SearchConfig,
    ) -> Result<Vec<CandidateAccount>, SearchError> {
        tracing::trace!(keyword = request.trimmed_keyword(), "Facebook mobile page search");

        let html = http::fetch_text(
            client
                .get(config.endpoints.url(SourceKind::FacebookMobilePage, "search/pages/"))
                .query(&[("q", request.trimmed_keyword())]),
            SourceKind::FacebookMobilePage,
        )
        .await?;

        tracing::trace!(bytes = html.len(), "Facebook mobile page received");
        parse_search_page(&html, request.upstream_limit())
    }

    fn kind(&self) -> SourceKind {
        SourceKind::FacebookMobilePage
    }
}

/// Parse an mbasic search results page into candidates.
///
/// Extracted as a separate function for testability with mock HTML.
pub(crate) fn parse_search_page(
    html: &str,
    max_results: usize,
) -> Result<Vec<CandidateAccount>, SearchError> {
    let document = Html::parse_document(html);

    let row_sel = Selector::parse("#BrowseResultsContainer > div, #root table[role=\"presentation\"]")
        .map_err(|e| SearchError::Parse(format!("invalid row selector: {e:?}")))?;
    let link_sel = Selector::parse("a[href]")
        .map_err(|e| SearchError::Parse(format!("invalid link selector: {e:?}")))?;

    let mut candidates = Vec::new();

    for row in document.select(&row_sel) {
        let Some((link, url, handle)) = row
            .select(&link_sel)
            .find_map(|a| profile_link(a).map(|(url, handle)| (a, url, handle)))
        else {
            continue;
        };

        let name = squash_whitespace(&link.text().collect::<String>());
        if name.is_empty() {
            continue;
        }

        let mut candidate = CandidateAccount::new(name.clone(), url, SourceKind::FacebookMobilePage);
        if let Some(handle) = handle {
            candidate = candidate.with_handle(handle);
        }
        let description = row_text_without(row, &name);
        candidate = candidate.with_description(description);

        candidates.push(candidate);
        if candidates.len() >= max_results {
            break;
        }
    }

    tracing::debug!(count = candidates.len(), "Facebook mobile page parsed");
    Ok(candidates)
}

/// Resolve a result link to a canonical page URL and, for vanity URLs,
/// the page username.
fn profile_link(anchor: ElementRef<'_>) -> Option<(String, Option<String>)> {
    let href = anchor.value().attr("href")?;
    let base = Url::parse(FACEBOOK_WEB_ROOT).ok()?;
    let resolved = base.join(href).ok()?;
    if !resolved
        .host_str()
        .is_some_and(|h| h == "facebook.com" || h.ends_with(".facebook.com"))
    {
        return None;
    }

    let segment = resolved
        .path_segments()?
        .find(|s| !s.is_empty())?
        .to_string();

    if segment == "profile.php" {
        let id = resolved
            .query_pairs()
            .find(|(k, _)| k == "id")
            .map(|(_, v)| v.into_owned())?;
        return Some((format!("{FACEBOOK_WEB_ROOT}/profile.php?id={id}"), None));
    }
    if RESERVED_PATHS.contains(&segment.as_str()) {
        return None;
    }
    Some((format!("{FACEBOOK_WEB_ROOT}/{segment}"), Some(segment)))
}

/// All text in a result row except the page name itself.
fn row_text_without(row: ElementRef<'_>, name: &str) -> String {
    let text = squash_whitespace(&row.text().collect::<Vec<_>>().join(" "));
    squash_whitespace(&text.replacen(name, "", 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_MBASIC_HTML: &str = r#"<!DOCTYPE html>
<html><body><div id="root">
<div id="BrowseResultsContainer">
  <div>
    <a href="/AcmeCorp/?refid=46&amp;__tn__=C">Acme Corp</a>
    <div>Manufacturing · 12K like this</div>
    <div>Official page of Acme Corp.</div>
  </div>
  <div>
    <a href="/profile.php?id=1000123&amp;refid=46">Acme  Support</a>
    <div>Community</div>
  </div>
  <div>
    <a href="/search/pages/?q=acme&amp;page=2">See more results</a>
  </div>
  <div>
    <a href="https://evil.example/acme">Acme Phish</a>
  </div>
</div>
</div></body></html>"#;

    #[test]
    fn parse_mock_html_returns_pages() {
        let results = parse_search_page(MOCK_MBASIC_HTML, 10).expect("should parse");
        assert_eq!(results.len(), 2);

        assert_eq!(results[0].name, "Acme Corp");
        assert_eq!(results[0].url, "https://www.facebook.com/AcmeCorp");
        assert_eq!(results[0].handle.as_deref(), Some("AcmeCorp"));
        let description = results[0].description.as_deref().expect("description");
        assert!(description.contains("Manufacturing"));
        assert!(description.contains("Official page"));

        assert_eq!(results[1].name, "Acme Support");
        assert_eq!(results[1].url, "https://www.facebook.com/profile.php?id=1000123");
        assert!(results[1].handle.is_none());
        assert_eq!(results[1].description.as_deref(), Some("Community"));
    }

    #[test]
    fn parse_respects_max_results() {
        let results = parse_search_page(MOCK_MBASIC_HTML, 1).expect("should parse");
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn login_wall_returns_empty() {
        let html = r#"<html><body><div id="root"><a href="/login.php">Log in</a></div></body></html>"#;
        let results = parse_search_page(html, 10).expect("should parse");
        assert!(results.is_empty());
    }
}
