//! Core search orchestrator: sequential fallback chain, match, dedup.
//!
//! Runs a platform's sources in priority order, applies the inclusion rule
//! to every candidate, merges the survivors, deduplicates by canonical URL
//! and truncates to the requested limit. Sources run one at a time with a
//! fixed throttle delay before each fallback; there is no fan-out.

use crate::config::SearchConfig;
use crate::source::{throttle, CandidateSource};
use crate::types::{MatchedAccount, Platform, SearchRequest};

use super::dedup::deduplicate;
use super::scoring::evaluate;

/// Search one platform through its fixed source chain.
///
/// See [`run_chain`] for the pipeline. Never fails: upstream errors are
/// logged and an exhausted chain yields an empty vector.
pub async fn orchestrate_search(
    platform: Platform,
    client: &reqwest::Client,
    request: &SearchRequest,
    config: &SearchConfig,
) -> Vec<MatchedAccount> {
    tracing::debug!(%platform, "starting platform search");
    let results = run_chain(platform.chain(), client, request, config).await;
    tracing::info!(%platform, count = results.len(), "platform search finished");
    results
}

/// Run an ordered chain of sources.
///
/// # Pipeline
///
/// 1. Query the first source (the official API)
/// 2. Keep candidates whose name or handle scores at least
///    `request.threshold`, or whose description mentions the keyword
/// 3. If nothing was kept, try each fallback in order, sleeping for
///    `request.throttle` first; stop at the first fallback that yields
///    matches unless `config.exhaustive_fallbacks` is set
/// 4. Deduplicate by canonical URL (first occurrence wins)
/// 5. Truncate to `request.limit`
///
/// A source that errors is logged at warn level and treated as empty.
/// Fallbacks are skipped entirely when `config.scraping_enabled` is false.
pub async fn run_chain<S: CandidateSource>(
    sources: &[S],
    client: &reqwest::Client,
    request: &SearchRequest,
    config: &SearchConfig,
) -> Vec<MatchedAccount> {
    let keyword = request.trimmed_keyword();
    let mut merged: Vec<MatchedAccount> = Vec::new();

    for (position, source) in sources.iter().enumerate() {
        let kind = source.kind();

        if position > 0 {
            // Fallbacks only run when the API found nothing; after that,
            // exhaustive mode keeps going past the first productive fallback.
            if !merged.is_empty() && (position == 1 || !config.exhaustive_fallbacks) {
                break;
            }
            if !config.scraping_enabled {
                tracing::debug!(source = %kind, "scraping disabled, skipping fallbacks");
                break;
            }
            tracing::debug!(source = %kind, "falling back");
            throttle(request.throttle).await;
        }

        match source.fetch(client, request, config).await {
            Ok(candidates) => {
                let fetched = candidates.len();
                let included: Vec<MatchedAccount> = candidates
                    .into_iter()
                    .filter_map(|candidate| evaluate(candidate, keyword, request.threshold))
                    .collect();
                tracing::debug!(source = %kind, fetched, included = included.len(), "source returned candidates");
                merged.extend(included);
            }
            Err(err) => {
                tracing::warn!(source = %kind, error = %err, "source failed");
            }
        }
    }

    let mut results = deduplicate(merged);
    results.truncate(request.limit);
    results
}
