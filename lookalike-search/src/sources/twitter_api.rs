//! Twitter API: official user search with a bearer token.

use serde::Deserialize;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::source::CandidateSource;
use crate::types::{CandidateAccount, SearchRequest, SourceKind};

/// Canonical profile root; handles are case-insensitive so URLs use lowercase.
pub(crate) const PROFILE_ROOT: &str = "https://x.com";

/// Twitter `users/search`.
pub struct TwitterApiSource;

#[derive(Debug, Deserialize)]
struct User {
    #[serde(default)]
    name: String,
    #[serde(default)]
    screen_name: String,
    #[serde(default)]
    description: Option<String>,
}

impl CandidateSource for TwitterApiSource {
    async fn fetch(
        &self,
        client: &reqwest::Client,
        request: &SearchRequest,
        config: &SearchConfig,
    ) -> Result<Vec<CandidateAccount>, SearchError> {
        let token = config.credential_for(SourceKind::TwitterApi)?;
        tracing::trace!(keyword = request.trimmed_keyword(), "Twitter API search");

        let count = request.upstream_limit().to_string();
        let users: Vec<User> = http::fetch_json(
            client
                .get(config.endpoints.url(SourceKind::TwitterApi, "1.1/users/search.json"))
                .bearer_auth(token)
                .query(&[
                    ("q", request.trimmed_keyword()),
                    ("count", count.as_str()),
                    ("include_entities", "false"),
                ]),
            SourceKind::TwitterApi,
        )
        .await?;

        let candidates: Vec<CandidateAccount> = users.into_iter().filter_map(into_candidate).collect();
        tracing::debug!(count = candidates.len(), "Twitter API users found");
        Ok(candidates)
    }

    fn kind(&self) -> SourceKind {
        SourceKind::TwitterApi
    }
}

/// Build the canonical profile URL for a handle.
pub(crate) fn profile_url(handle: &str) -> String {
    format!("{PROFILE_ROOT}/{}", handle.trim_start_matches('@').to_lowercase())
}

fn into_candidate(user: User) -> Option<CandidateAccount> {
    let handle = user.screen_name.trim();
    if handle.is_empty() {
        return None;
    }
    let name = if user.name.trim().is_empty() {
        handle.to_string()
    } else {
        user.name.trim().to_string()
    };

    let mut candidate = CandidateAccount::new(name, profile_url(handle), SourceKind::TwitterApi)
        .with_handle(handle);
    if let Some(description) = user.description {
        candidate = candidate.with_description(description);
    }
    Some(candidate)
}
