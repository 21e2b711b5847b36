//! Trait definition for pluggable candidate sources.
//!
//! Every acquisition method, whether an official API or a scraper, implements
//! [`CandidateSource`], so a platform's fallback chain is just an ordered
//! list of sources sharing one contract.

use std::time::Duration;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::{CandidateAccount, SearchRequest, SourceKind};

/// A pluggable source of candidate accounts.
///
/// Implementors query one upstream and convert its typed payload into
/// [`CandidateAccount`]s. Each source handles its own:
///
/// - URL construction with query encoding
/// - credentials, where the upstream needs them
/// - HTML or JSON extraction
/// - per-item enrichment, throttled by the request's fixed delay
///
/// Sources return raw candidates; the inclusion rule is applied by the
/// orchestrator so every source is judged the same way.
pub trait CandidateSource: Send + Sync {
    /// Fetch candidates for `request.keyword`, at most `request.limit` of them.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the upstream is unreachable, answers with
    /// a non-success status, or its payload cannot be interpreted.
    fn fetch(
        &self,
        client: &reqwest::Client,
        request: &SearchRequest,
        config: &SearchConfig,
    ) -> impl std::future::Future<Output = Result<Vec<CandidateAccount>, SearchError>> + Send;

    /// Returns which [`SourceKind`] this implementation represents.
    fn kind(&self) -> SourceKind;
}

/// Sleep for the request's fixed throttle interval.
///
/// A zero interval returns immediately.
pub async fn throttle(interval: Duration) {
    if !interval.is_zero() {
        tokio::time::sleep(interval).await;
    }
}
